use std::{env, fs};

use monkey::Monkey;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn main() -> eyre::Result<()> {
    let mut monkey = Monkey::new();
    let args: Vec<String> = env::args().collect();
    match args.as_slice() {
        [_] => repl(&mut monkey),
        [_, file_path] => {
            let content = fs::read_to_string(file_path)?;
            let _ = monkey.eval(&content);
            Ok(())
        }
        _ => eyre::bail!("usage: monkey [script]"),
    }
}

fn repl(monkey: &mut Monkey) -> eyre::Result<()> {
    println!("Monkey lang");
    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let _ = monkey.eval(&line);
            }
            Err(ReadlineError::Interrupted) => {
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

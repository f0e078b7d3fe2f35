pub mod ast;
pub mod evaluator;
pub mod object;
pub mod parser;
pub mod token;

mod builtins;
mod lexer;

use std::rc::Rc;

use evaluator::eval_program;
use object::{Env, Environment, Object};
use parser::Parser;

/// Host facade: one environment that survives across chunks, so REPL
/// sessions keep their bindings.
pub struct Monkey {
    env: Env,
}

impl Monkey {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Parses and evaluates one chunk of source. Parse errors and non-null
    /// results are printed; the evaluated object is also returned for hosts
    /// that want it.
    pub fn eval(&mut self, source: &str) -> Option<Rc<Object>> {
        let program = match Parser::parse(source) {
            Ok(program) => program,
            Err(err) => {
                eprint!("{}", err);
                return None;
            }
        };
        let result = eval_program(&self.env, program);
        if !matches!(&*result, Object::Null) {
            println!("{}", result.inspect());
        }
        Some(result)
    }
}

impl Default for Monkey {
    fn default() -> Self {
        Self::new()
    }
}

// Entry point for the parser fuzz target: must never panic, the result is
// discarded.
pub fn parse_fuzz_input(input: &str) {
    let _ = Parser::parse(input);
}

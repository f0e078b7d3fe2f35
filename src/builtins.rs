use std::rc::Rc;

use crate::object::Object;

pub struct BuiltinFunction(pub Box<dyn Fn(Vec<Rc<Object>>) -> Rc<Object> + Sync>);

impl std::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "builtin-function")
    }
}

fn wrong_arg_count(got: usize, want: usize) -> Rc<Object> {
    Rc::new(Object::Error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    )))
}

fn must_be_array(name: &'static str, got: &Object) -> Rc<Object> {
    Rc::new(Object::Error(format!(
        "argument to `{}` must be ARRAY, got {}",
        name,
        got.type_as_str()
    )))
}

pub struct Builtins {}
impl Builtins {
    pub fn puts() -> BuiltinFunction {
        let puts_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            for item in items {
                println!("{}", item.inspect());
            }
            Object::null()
        };
        BuiltinFunction(Box::new(puts_fn))
    }

    pub fn to_str() -> BuiltinFunction {
        let str_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            if items.len() != 1 {
                return wrong_arg_count(items.len(), 1);
            }
            Rc::new(Object::Str(items[0].inspect()))
        };
        BuiltinFunction(Box::new(str_fn))
    }

    pub fn len() -> BuiltinFunction {
        let len_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            if items.len() != 1 {
                return wrong_arg_count(items.len(), 1);
            }
            Rc::new(match &*items[0] {
                Object::Str(s) => Object::Int(s.len() as i64),
                Object::Array(vs) => Object::Int(vs.len() as i64),
                Object::Hash(map) => Object::Int(map.len() as i64),
                other => Object::Error(format!(
                    "argument to `len` not supported, got {}",
                    other.type_as_str()
                )),
            })
        };
        BuiltinFunction(Box::new(len_fn))
    }

    pub fn first() -> BuiltinFunction {
        let first_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            if items.len() != 1 {
                return wrong_arg_count(items.len(), 1);
            }
            match &*items[0] {
                Object::Array(vs) => vs.first().map(Rc::clone).unwrap_or(Object::null()),
                other => must_be_array("first", other),
            }
        };
        BuiltinFunction(Box::new(first_fn))
    }

    pub fn last() -> BuiltinFunction {
        let last_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            if items.len() != 1 {
                return wrong_arg_count(items.len(), 1);
            }
            match &*items[0] {
                Object::Array(vs) => vs.last().map(Rc::clone).unwrap_or(Object::null()),
                other => must_be_array("last", other),
            }
        };
        BuiltinFunction(Box::new(last_fn))
    }

    pub fn rest() -> BuiltinFunction {
        let rest_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            if items.len() != 1 {
                return wrong_arg_count(items.len(), 1);
            }
            match &*items[0] {
                Object::Array(vs) => {
                    if vs.is_empty() {
                        Object::null()
                    } else {
                        Rc::new(Object::Array(
                            vs[1..].iter().map(Rc::clone).collect::<Vec<_>>(),
                        ))
                    }
                }
                other => must_be_array("rest", other),
            }
        };
        BuiltinFunction(Box::new(rest_fn))
    }

    // Non-mutating: the result is a fresh array, the argument is unchanged.
    pub fn push() -> BuiltinFunction {
        let push_fn = |items: Vec<Rc<Object>>| -> Rc<Object> {
            if items.len() != 2 {
                return wrong_arg_count(items.len(), 2);
            }
            let mut items = items;
            let new_val = items.pop().unwrap();
            let arg = items.pop().unwrap();
            match &*arg {
                Object::Array(vs) => {
                    let mut new_vs = Vec::with_capacity(vs.len() + 1);
                    new_vs.extend(vs.iter().map(Rc::clone));
                    new_vs.push(new_val);
                    Rc::new(Object::Array(new_vs))
                }
                other => must_be_array("push", other),
            }
        };
        BuiltinFunction(Box::new(push_fn))
    }
}

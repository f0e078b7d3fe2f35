use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::BlockStatement;

#[derive(Debug)]
pub enum Object {
    Null,
    Int(i64),
    Bool(bool),
    Str(String),
    Array(Vec<Rc<Object>>),
    Hash(HashMap<Key, Rc<Object>>),
    Function(Function),
    BuiltinFunction(String),
    Return(Rc<Object>),
    Error(String),
}

// Canonical instances, one set per thread since Rc is not Sync. The
// evaluator never manufactures fresh booleans or nulls.
thread_local! {
    static TRUE_OBJ: Rc<Object> = Rc::new(Object::Bool(true));
    static FALSE_OBJ: Rc<Object> = Rc::new(Object::Bool(false));
    static NULL_OBJ: Rc<Object> = Rc::new(Object::Null);
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL_OBJ.with(Rc::clone)
    }

    pub fn bool(b: bool) -> Rc<Object> {
        if b {
            TRUE_OBJ.with(Rc::clone)
        } else {
            FALSE_OBJ.with(Rc::clone)
        }
    }

    pub fn is_err(&self) -> bool {
        if let Object::Error(_) = self {
            true
        } else {
            false
        }
    }

    // Only Int, Bool and Str may be used as hash keys.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Object::Int(v) => Some(Key::Int(*v)),
            Object::Bool(v) => Some(Key::Bool(*v)),
            Object::Str(v) => Some(Key::Str(v.clone())),
            _ => None,
        }
    }

    pub fn inspect(&self) -> String {
        use Object::*;
        match self {
            Int(v) => v.to_string(),
            Bool(v) => v.to_string(),
            Str(v) => v.clone(),
            Null => "null".to_string(),
            Return(v) => v.inspect(),
            Error(msg) => format!("ERROR: {}", msg),
            Function(f) => f.inspect(),
            BuiltinFunction(_) => "builtin function".to_string(),
            Array(vs) => {
                let elems = vs
                    .iter()
                    .map(|v| v.inspect())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", elems)
            }
            Hash(map) => {
                let pairs = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.inspect(), v.inspect()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", pairs)
            }
        }
    }

    pub fn type_as_str(&self) -> &str {
        use Object::*;
        match self {
            Int(_) => "INTEGER",
            Bool(_) => "BOOLEAN",
            Str(_) => "STRING",
            Null => "NULL",
            Return(_) => "RETURN_VALUE",
            Error(_) => "ERROR",
            Function(_) => "FUNCTION",
            BuiltinFunction(_) => "BUILTIN",
            Array(_) => "ARRAY",
            Hash(_) => "HASH",
        }
    }
}

// Hashable key, one variant per hashable object type. The enum discriminant
// keeps keys of different types distinct even when their values collide
// (1 vs true vs "1").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl Key {
    pub fn inspect(&self) -> String {
        match self {
            Key::Int(v) => v.to_string(),
            Key::Bool(v) => v.to_string(),
            Key::Str(v) => v.clone(),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Env,
}

impl Function {
    fn inspect(&self) -> String {
        let parts = [
            "fn(",
            &self.parameters.join(", "),
            ") {\n",
            &self.body.to_string(),
            "\n}",
        ];
        parts.into_iter().collect::<String>()
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

pub type Env = Rc<RefCell<Environment>>;

pub struct Environment {
    outer: Option<Env>,
    curr: HashMap<String, Rc<Object>>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment {
            outer: None,
            curr: HashMap::new(),
        }))
    }

    pub fn with_outer(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            outer: Some(Rc::clone(outer)),
            curr: HashMap::new(),
        }))
    }

    // Lookup walks outward through the enclosing scopes.
    pub fn get(env: &Env, name: &str) -> Option<Rc<Object>> {
        let e = env.borrow();
        if let Some(v) = e.curr.get(name) {
            Some(Rc::clone(v))
        } else if let Some(outer) = &e.outer {
            Environment::get(outer, name)
        } else {
            None
        }
    }

    // Definition always writes the innermost scope; shadowing is allowed.
    pub fn set(env: &Env, name: &str, val: &Rc<Object>) {
        env.borrow_mut().curr.insert(name.into(), Rc::clone(val));
    }
}

#[cfg(test)]
mod object_tests {
    use super::*;

    #[test]
    fn test_keys_distinguish_type_and_value() {
        let int_key = Object::Int(1).as_key().unwrap();
        let bool_key = Object::Bool(true).as_key().unwrap();
        let str_key = Object::Str("1".into()).as_key().unwrap();
        assert_ne!(int_key, bool_key);
        assert_ne!(int_key, str_key);
        assert_ne!(bool_key, str_key);
        assert_eq!(int_key, Object::Int(1).as_key().unwrap());
    }

    #[test]
    fn test_non_hashable_objects_have_no_key() {
        assert!(Object::Null.as_key().is_none());
        assert!(Object::Array(vec![]).as_key().is_none());
        assert!(Object::Hash(HashMap::new()).as_key().is_none());
    }

    #[test]
    fn test_environment_shadowing_and_lookup() {
        let outer = Environment::new();
        Environment::set(&outer, "x", &Rc::new(Object::Int(1)));
        Environment::set(&outer, "y", &Rc::new(Object::Int(2)));

        let inner = Environment::with_outer(&outer);
        Environment::set(&inner, "x", &Rc::new(Object::Int(10)));

        // inner shadows, outer is untouched
        match &*Environment::get(&inner, "x").unwrap() {
            Object::Int(v) => assert_eq!(*v, 10),
            other => panic!("expected Int, got {:?}", other),
        }
        match &*Environment::get(&outer, "x").unwrap() {
            Object::Int(v) => assert_eq!(*v, 1),
            other => panic!("expected Int, got {:?}", other),
        }
        // lookup walks outward
        match &*Environment::get(&inner, "y").unwrap() {
            Object::Int(v) => assert_eq!(*v, 2),
            other => panic!("expected Int, got {:?}", other),
        }
        assert!(Environment::get(&inner, "z").is_none());
    }

    #[test]
    fn test_inspect() {
        assert_eq!(Object::Int(42).inspect(), "42");
        assert_eq!(Object::Bool(true).inspect(), "true");
        assert_eq!(Object::Str("hi".into()).inspect(), "hi");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::Error("boom".into()).inspect(), "ERROR: boom");
        let arr = Object::Array(vec![Rc::new(Object::Int(1)), Object::bool(false)]);
        assert_eq!(arr.inspect(), "[1, false]");
    }
}

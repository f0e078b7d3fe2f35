use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;

use crate::ast::{self, Expression, Statement};
use crate::builtins::{BuiltinFunction, Builtins};
use crate::object::{Env, Environment, Function, Object};

lazy_static! {
    static ref BUILTINS: HashMap<String, BuiltinFunction> = {
        let mut m = HashMap::new();
        m.insert("puts".into(), Builtins::puts());
        m.insert("str".into(), Builtins::to_str());
        m.insert("len".into(), Builtins::len());
        m.insert("first".into(), Builtins::first());
        m.insert("last".into(), Builtins::last());
        m.insert("rest".into(), Builtins::rest());
        m.insert("push".into(), Builtins::push());
        m
    };
}

// Top-level entry: a Return envelope is unwrapped here so it never escapes
// to the host, an Error aborts the remaining statements.
pub fn eval_program(env: &Env, program: ast::Program) -> Rc<Object> {
    let mut res = Object::null();
    for stmt in &program.statements {
        res = eval_statement(env, stmt);
        match &*res {
            Object::Return(v) => return Rc::clone(v),
            Object::Error(_) => return res,
            _ => continue,
        }
    }
    res
}

// Unlike eval_program, Return is propagated as-is so the enclosing function
// body (and only it) gets unwound.
fn eval_block_statements(env: &Env, statements: &[Statement]) -> Rc<Object> {
    let mut res = Object::null();
    for stmt in statements {
        res = eval_statement(env, stmt);
        match *res {
            Object::Return(_) => return res,
            Object::Error(_) => return res,
            _ => continue,
        }
    }
    res
}

fn eval_statement(env: &Env, stmt: &Statement) -> Rc<Object> {
    use Statement::*;
    match stmt {
        LetStmt { name, value, .. } => {
            let result = eval_expression(env, value);
            if !result.is_err() {
                Environment::set(env, &name.value, &result);
            }
            result
        }
        ReturnStmt { value, .. } => {
            let result = eval_expression(env, value);
            if result.is_err() {
                result
            } else {
                Rc::new(Object::Return(result))
            }
        }
        ExpressionStmt { value, .. } => eval_expression(env, value),
    }
}

fn eval_expression(env: &Env, expr: &Expression) -> Rc<Object> {
    use Expression::*;
    match expr {
        IntegerLiteral { value, .. } => Rc::new(Object::Int(*value)),
        StringLiteral { value, .. } => Rc::new(Object::Str(value.clone())),
        Boolean { value, .. } => Object::bool(*value),
        PrefixExpression {
            operator, right, ..
        } => {
            let right = eval_expression(env, right);
            if right.is_err() {
                return right;
            }
            eval_prefix_expression(operator, &right)
        }
        InfixExpression {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(env, left);
            if left.is_err() {
                return left;
            }
            let right = eval_expression(env, right);
            if right.is_err() {
                return right;
            }
            eval_infix_expression(operator, &left, &right)
        }
        IfExpression {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(env, condition);
            if condition.is_err() {
                return condition;
            }
            if is_truthy(&condition) {
                eval_block_statements(env, &consequence.statements)
            } else if let Some(alt) = alternative {
                eval_block_statements(env, &alt.statements)
            } else {
                Object::null()
            }
        }
        Identifier(identifier) => {
            if let Some(obj) = Environment::get(env, &identifier.value) {
                obj
            } else if BUILTINS.contains_key(&identifier.value) {
                Rc::new(Object::BuiltinFunction(identifier.value.clone()))
            } else {
                to_err_obj(format!("identifier not found: {}", &identifier.value))
            }
        }
        FunctionLiteral {
            parameters, body, ..
        } => {
            let parameters = parameters
                .iter()
                .map(|v| v.value.clone())
                .collect::<Vec<_>>();
            let function = Function {
                parameters,
                body: body.clone(),
                env: Rc::clone(env),
            };
            Rc::new(Object::Function(function))
        }
        ArrayLiteral { elements, .. } => {
            let evaluated_elems = eval_expressions(env, elements);
            if evaluated_elems.len() == 1 && evaluated_elems[0].is_err() {
                return Rc::clone(&evaluated_elems[0]);
            }
            Rc::new(Object::Array(evaluated_elems))
        }
        HashLiteral { entries, .. } => {
            let mut map = HashMap::new();
            for (key_expr, val_expr) in entries {
                let res = eval_expression(env, key_expr);
                if res.is_err() {
                    return res;
                }
                let key = match res.as_key() {
                    Some(k) => k,
                    None => {
                        return to_err_obj(format!(
                            "unusable as a hash key: {}",
                            res.type_as_str()
                        ))
                    }
                };
                let val = eval_expression(env, val_expr);
                if val.is_err() {
                    return val;
                }
                map.insert(key, val);
            }
            Rc::new(Object::Hash(map))
        }
        IndexExpression { left, index, .. } => {
            let left = eval_expression(env, left);
            if left.is_err() {
                return left;
            }
            let index = eval_expression(env, index);
            if index.is_err() {
                return index;
            }
            eval_index_expression(&left, &index)
        }
        CallExpression {
            function: expr,
            arguments,
            ..
        } => {
            let res = eval_expression(env, expr);
            if res.is_err() {
                return res;
            }
            let evaluated_args = eval_expressions(env, arguments);
            if evaluated_args.len() == 1 && evaluated_args[0].is_err() {
                return Rc::clone(&evaluated_args[0]);
            }
            apply_function(&res, evaluated_args)
        }
    }
}

fn apply_function(callee: &Rc<Object>, args: Vec<Rc<Object>>) -> Rc<Object> {
    let function = match &**callee {
        Object::Function(f) => f,
        Object::BuiltinFunction(id) => {
            let builtin_function = BUILTINS.get(id).unwrap();
            return builtin_function.0(args);
        }
        _ => return to_err_obj(format!("not a function: {}", callee.type_as_str())),
    };

    if function.parameters.len() != args.len() {
        return to_err_obj(format!(
            "wrong number of arguments: expected {}, got {}",
            function.parameters.len(),
            args.len(),
        ));
    }
    let extended_env = Environment::with_outer(&function.env);
    for (obj, name) in args.into_iter().zip(function.parameters.iter()) {
        Environment::set(&extended_env, name, &obj);
    }
    let result = eval_block_statements(&extended_env, &function.body.statements);
    match &*result {
        Object::Return(v) => Rc::clone(v),
        _ => result,
    }
}

// Arguments evaluate left to right; the first error abandons the rest and
// comes back as a single-element vec.
fn eval_expressions(env: &Env, exprs: &[Expression]) -> Vec<Rc<Object>> {
    let mut results = Vec::new();
    for expr in exprs {
        let result = eval_expression(env, expr);
        if result.is_err() {
            return vec![result];
        }
        results.push(result);
    }
    return results;
}

// Everything except null and false is truthy, including 0 and "".
fn is_truthy(obj: &Object) -> bool {
    match obj {
        Object::Null | Object::Bool(false) => false,
        _ => true,
    }
}

fn eval_index_expression(left: &Rc<Object>, index: &Rc<Object>) -> Rc<Object> {
    use Object::{Array, Hash, Int};
    match (&**left, &**index) {
        (Array(vs), Int(n)) => {
            if *n < 0 {
                return Object::null();
            }
            let index = *n as usize;
            vs.get(index).map(Rc::clone).unwrap_or(Object::null())
        }
        (Hash(map), _) => {
            let key = match index.as_key() {
                Some(k) => k,
                None => {
                    return to_err_obj(format!(
                        "unusable as a hash key: {}",
                        index.type_as_str()
                    ))
                }
            };
            map.get(&key).map(Rc::clone).unwrap_or(Object::null())
        }
        (_, _) => to_err_obj(format!(
            "index operator not supported: {}",
            left.type_as_str()
        )),
    }
}

// Value semantics for Int/Bool/Str/Null, identity semantics for the
// reference types (arrays, hashes, functions).
fn is_equal(left: &Rc<Object>, right: &Rc<Object>) -> bool {
    use Object::*;
    match (&**left, &**right) {
        (Int(l), Int(r)) => l == r,
        (Bool(l), Bool(r)) => l == r,
        (Str(l), Str(r)) => l == r,
        (Null, Null) => true,
        (BuiltinFunction(l), BuiltinFunction(r)) => l == r,
        _ => Rc::ptr_eq(left, right),
    }
}

fn eval_infix_expression(operator: &str, left: &Rc<Object>, right: &Rc<Object>) -> Rc<Object> {
    use Object::*;
    match (&**left, operator, &**right) {
        (Int(l), _, Int(r)) => eval_integer_infix_expression(operator, *l, *r),
        (_, "==", _) => Object::bool(is_equal(left, right)),
        (_, "!=", _) => Object::bool(!is_equal(left, right)),
        (Str(l), "+", Str(r)) => {
            let mut s = String::with_capacity(l.len() + r.len());
            s.push_str(l);
            s.push_str(r);
            Rc::new(Object::Str(s))
        }
        (l, _, r) => {
            if l.type_as_str() != r.type_as_str() {
                to_err_obj(format!(
                    "type mismatch: {} {} {}",
                    l.type_as_str(),
                    operator,
                    r.type_as_str()
                ))
            } else {
                to_err_obj(format!(
                    "unknown operator: {} {} {}",
                    l.type_as_str(),
                    operator,
                    r.type_as_str()
                ))
            }
        }
    }
}

fn eval_integer_infix_expression(operator: &str, l: i64, r: i64) -> Rc<Object> {
    let int = |n| Rc::new(Object::Int(n));
    match operator {
        "+" => int(l + r),
        "-" => int(l - r),
        "*" => int(l * r),
        "/" => {
            if r == 0 {
                to_err_obj("division by zero".into())
            } else {
                int(l / r)
            }
        }
        "<" => Object::bool(l < r),
        ">" => Object::bool(l > r),
        "==" => Object::bool(l == r),
        "!=" => Object::bool(l != r),
        _ => to_err_obj(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn to_err_obj(msg: String) -> Rc<Object> {
    Rc::new(Object::Error(msg))
}

fn eval_prefix_expression(operator: &str, right: &Rc<Object>) -> Rc<Object> {
    if operator == "!" {
        Object::bool(!is_truthy(right))
    } else if operator == "-" {
        if let Object::Int(v) = &**right {
            Rc::new(Object::Int(-v))
        } else {
            to_err_obj(format!("unknown operator: -{}", right.type_as_str()))
        }
    } else {
        to_err_obj(format!(
            "unknown operator: {}{}",
            operator,
            right.type_as_str()
        ))
    }
}

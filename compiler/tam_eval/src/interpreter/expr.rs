//! Expression evaluation.

use std::rc::Rc;

use tam_ir::{
    AssignOp, BinaryOp, ExprId, ExprKind, ExprRange, MapEntryRange, PostfixOp, PrefixOp,
    SharedArena,
};
use tam_stack::ensure_sufficient_stack;

use super::{Evaluator, Flow};
use crate::attributes::get_attribute;
use crate::environment::{AssignError, Environment};
use crate::errors::{undefined_name, unhashable, EvalError};
use crate::index::{get_index, get_slice, set_index};
use crate::object::{set_items, Function, HashPair, HashPairs, Object};
use crate::operators::{evaluate_binary, evaluate_negation, evaluate_not};

impl Evaluator<'_> {
    /// Evaluate `id`, growing the native stack first when it runs low.
    pub(super) fn eval_expr(&mut self, arena: &SharedArena, id: ExprId, env: &Environment) -> Flow {
        ensure_sufficient_stack(|| self.eval_expr_inner(arena, id, env))
    }

    fn eval_expr_inner(&mut self, arena: &SharedArena, id: ExprId, env: &Environment) -> Flow {
        match &arena.get_expr(id).kind {
            ExprKind::Int(n) => Ok(Object::Integer(*n)),
            ExprKind::Float(f) => Ok(Object::Float(*f)),
            ExprKind::String(s) => Ok(Object::String(Rc::clone(s))),
            ExprKind::Bool(b) => Ok(Object::Boolean(*b)),
            ExprKind::Null => Ok(Object::Null),
            ExprKind::Ident(name) => Ok(self.lookup(name, env)?),

            ExprKind::Prefix { op, operand } => {
                let value = self.eval_expr(arena, *operand, env)?;
                match op {
                    PrefixOp::Neg => Ok(evaluate_negation(&value)?),
                    PrefixOp::Not => Ok(evaluate_not(&value)),
                }
            }
            ExprKind::Binary { op, left, right } => {
                self.eval_binary(arena, *op, *left, *right, env)
            }
            ExprKind::Postfix { op, target } => self.eval_postfix(arena, *op, *target, env),
            ExprKind::Assign { op, target, value } => {
                self.eval_assign(arena, *op, *target, *value, env)
            }

            ExprKind::Call { func, args } => {
                let callee = self.eval_expr(arena, *func, env)?;
                let args = self.eval_exprs(arena, *args, env)?;
                self.call_object(&callee, args)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval_expr(arena, *receiver, env)?;
                let index = self.eval_expr(arena, *index, env)?;
                Ok(get_index(&receiver, &index)?)
            }
            ExprKind::Slice {
                receiver,
                low,
                high,
            } => {
                let receiver = self.eval_expr(arena, *receiver, env)?;
                let low = self.eval_optional(arena, *low, env)?;
                let high = self.eval_optional(arena, *high, env)?;
                Ok(get_slice(&receiver, low.as_ref(), high.as_ref())?)
            }
            ExprKind::Attribute { receiver, name } => {
                let receiver = self.eval_expr(arena, *receiver, env)?;
                Ok(get_attribute(&receiver, name)?)
            }

            ExprKind::Array(elements) => {
                let items = self.eval_exprs(arena, *elements, env)?;
                Ok(Object::array(items))
            }
            ExprKind::Hash(entries) => self.eval_hash(arena, *entries, env),
            ExprKind::Set(elements) => {
                let elements = self.eval_exprs(arena, *elements, env)?;
                Ok(Object::set(set_items(elements)?))
            }

            ExprKind::Function { name, params, body } => {
                let func = Function::new(
                    name.clone(),
                    *params,
                    *body,
                    arena.clone(),
                    env.clone(),
                );
                Ok(Object::Function(Rc::new(func)))
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.eval_expr(arena, *condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(arena, *then_branch, &env.child())
                } else if let Some(else_branch) = else_branch {
                    self.eval_expr(arena, *else_branch, env)
                } else {
                    Ok(Object::Null)
                }
            }
            ExprKind::Block(statements) => self.eval_block(arena, *statements, &env.child()),
        }
    }

    /// Scope chain first, then the builtin registry.
    fn lookup(&self, name: &str, env: &Environment) -> Result<Object, EvalError> {
        env.get(name)
            .or_else(|| self.interp.registry.get(name))
            .ok_or_else(|| undefined_name(name))
    }

    fn eval_exprs(
        &mut self,
        arena: &SharedArena,
        range: ExprRange,
        env: &Environment,
    ) -> Result<Vec<Object>, super::Unwind> {
        let ids = arena.get_expr_list(range);
        let mut values = Vec::with_capacity(ids.len());
        for &id in ids {
            values.push(self.eval_expr(arena, id, env)?);
        }
        Ok(values)
    }

    fn eval_optional(
        &mut self,
        arena: &SharedArena,
        id: Option<ExprId>,
        env: &Environment,
    ) -> Result<Option<Object>, super::Unwind> {
        id.map(|id| self.eval_expr(arena, id, env)).transpose()
    }

    /// `&&` and `||` skip the right operand when the left decides.
    fn eval_binary(
        &mut self,
        arena: &SharedArena,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        env: &Environment,
    ) -> Flow {
        let left = self.eval_expr(arena, left, env)?;
        match op {
            BinaryOp::And if !left.is_truthy() => return Ok(Object::Boolean(false)),
            BinaryOp::Or if left.is_truthy() => return Ok(Object::Boolean(true)),
            _ => {}
        }
        let right = self.eval_expr(arena, right, env)?;
        Ok(evaluate_binary(&left, &right, op)?)
    }

    /// `x++` / `x--`: update the nearest frame defining `x` and yield the
    /// new value.
    fn eval_postfix(
        &mut self,
        arena: &SharedArena,
        op: PostfixOp,
        target: ExprId,
        env: &Environment,
    ) -> Flow {
        let ExprKind::Ident(name) = &arena.get_expr(target).kind else {
            return Err(undefined_name(&operand_text(&arena.get_expr(target).kind)).into());
        };
        let current = self.lookup(name, env)?;
        let op = match op {
            PostfixOp::Increment => BinaryOp::Add,
            PostfixOp::Decrement => BinaryOp::Sub,
        };
        let updated = evaluate_binary(&current, &Object::Integer(1), op)?;
        assign_name(env, name, updated.clone())?;
        Ok(updated)
    }

    /// Plain and compound assignment to a name or an index target. The
    /// assigned value is the result.
    fn eval_assign(
        &mut self,
        arena: &SharedArena,
        op: AssignOp,
        target: ExprId,
        value: ExprId,
        env: &Environment,
    ) -> Flow {
        match &arena.get_expr(target).kind {
            ExprKind::Ident(name) => {
                let value = self.eval_expr(arena, value, env)?;
                let value = match op.binary_op() {
                    None => value,
                    Some(bin) => evaluate_binary(&self.lookup(name, env)?, &value, bin)?,
                };
                assign_name(env, name, value.clone())?;
                Ok(value)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval_expr(arena, *receiver, env)?;
                let index = self.eval_expr(arena, *index, env)?;
                let value = self.eval_expr(arena, value, env)?;
                let value = match op.binary_op() {
                    None => value,
                    Some(bin) => evaluate_binary(&get_index(&receiver, &index)?, &value, bin)?,
                };
                set_index(&receiver, &index, value.clone())?;
                Ok(value)
            }
            other => Err(undefined_name(&operand_text(other)).into()),
        }
    }

    /// Keys are checked for hashability as they are evaluated, before the
    /// matching value.
    fn eval_hash(&mut self, arena: &SharedArena, entries: MapEntryRange, env: &Environment) -> Flow {
        let entries = arena.get_map_entries(entries);
        let mut pairs = HashPairs::default();
        for entry in entries {
            let key = self.eval_expr(arena, entry.key, env)?;
            let hash_key = key.hash_key().ok_or_else(|| unhashable(&key))?;
            let value = self.eval_expr(arena, entry.value, env)?;
            pairs.insert(hash_key, HashPair { key, value });
        }
        Ok(Object::hash(pairs))
    }
}

fn assign_name(env: &Environment, name: &str, value: Object) -> Result<(), EvalError> {
    env.assign(name, value).map_err(|err| match err {
        AssignError::Undefined => undefined_name(name),
    })
}

/// Source-like rendering of an operand that cannot be assigned to.
fn operand_text(kind: &ExprKind) -> String {
    match kind {
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Float(f) => format!("{f:?}"),
        ExprKind::String(s) => format!("{s:?}"),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Null => "null".to_string(),
        ExprKind::Ident(name) => name.to_string(),
        _ => "expression".to_string(),
    }
}

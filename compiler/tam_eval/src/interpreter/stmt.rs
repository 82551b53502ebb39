//! Statements, blocks and loops.

use tam_ir::{ExprId, SharedArena, StmtId, StmtKind, StmtRange};

use super::{Evaluator, Flow, Unwind};
use crate::environment::Environment;
use crate::object::Object;

impl Evaluator<'_> {
    pub(super) fn eval_stmt(&mut self, arena: &SharedArena, id: StmtId, env: &Environment) -> Flow {
        match &arena.get_stmt(id).kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(arena, *value, env)?;
                env.define(name.clone(), value);
                Ok(Object::Null)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(value) => self.eval_expr(arena, *value, env)?,
                    None => Object::Null,
                };
                Err(Unwind::Return(value))
            }
            StmtKind::Break => Err(Unwind::Break),
            StmtKind::Continue => Err(Unwind::Continue),
            StmtKind::Expr(expr) => self.eval_expr(arena, *expr, env),
            StmtKind::FuncDecl { name, func } => {
                let func = self.eval_expr(arena, *func, env)?;
                env.define(name.clone(), func);
                Ok(Object::Null)
            }
            StmtKind::For {
                init,
                condition,
                post,
                body,
            } => self.eval_for(arena, *init, *condition, *post, *body, env),
        }
    }

    /// Run `statements` in `env`; the value is the last statement's.
    pub(super) fn eval_block(
        &mut self,
        arena: &SharedArena,
        statements: StmtRange,
        env: &Environment,
    ) -> Flow {
        let mut result = Object::Null;
        for &stmt in arena.get_stmt_list(statements) {
            result = self.eval_stmt(arena, stmt, env)?;
        }
        Ok(result)
    }

    /// All three `for` forms. `init` runs once in a loop frame; each
    /// iteration's body gets a fresh child of that frame. The context is
    /// checked before every iteration.
    fn eval_for(
        &mut self,
        arena: &SharedArena,
        init: Option<StmtId>,
        condition: Option<ExprId>,
        post: Option<ExprId>,
        body: StmtRange,
        env: &Environment,
    ) -> Flow {
        let loop_env = env.child();
        if let Some(init) = init {
            self.eval_stmt(arena, init, &loop_env)?;
        }

        loop {
            self.check_context()?;
            if let Some(condition) = condition {
                if !self.eval_expr(arena, condition, &loop_env)?.is_truthy() {
                    break;
                }
            }
            match self.eval_block(arena, body, &loop_env.child()) {
                Ok(_) | Err(Unwind::Continue) => {}
                Err(Unwind::Break) => break,
                Err(unwind) => return Err(unwind),
            }
            if let Some(post) = post {
                self.eval_expr(arena, post, &loop_env)?;
            }
        }
        Ok(Object::Null)
    }
}

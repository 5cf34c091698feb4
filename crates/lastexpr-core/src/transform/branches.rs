//! Structural walk over the branches of `if` and `switch`
//!
//! What happens to each branch block is up to the visitor; the walk only
//! guarantees that every branch is visited exactly once and in order.

use crate::ast::{Block, ElseBranch, Expr, IfExpr, SwitchCase, SwitchExpr};

pub trait BranchVisitor {
    /// Conditions and switch subjects
    fn visit_condition(&self, condition: Expr) -> Expr;

    /// `then`/`else` blocks and case bodies
    fn visit_branch(&self, block: Block) -> Block;
}

/// Visit every branch of an `if` / `else if` / `else` chain
pub fn map_if<V: BranchVisitor + ?Sized>(visitor: &V, if_expr: IfExpr) -> IfExpr {
    let IfExpr {
        condition,
        then_block,
        else_branch,
    } = if_expr;

    IfExpr {
        condition: Box::new(visitor.visit_condition(*condition)),
        then_block: visitor.visit_branch(then_block),
        else_branch: else_branch.map(|branch| match branch {
            ElseBranch::Block(block) => ElseBranch::Block(visitor.visit_branch(block)),
            ElseBranch::If(nested) => ElseBranch::If(Box::new(map_if(visitor, *nested))),
        }),
    }
}

/// Visit every case body of a `switch`. Unrecognized cases pass through.
pub fn map_switch<V: BranchVisitor + ?Sized>(visitor: &V, switch: SwitchExpr) -> SwitchExpr {
    SwitchExpr {
        subject: Box::new(visitor.visit_condition(*switch.subject)),
        cases: switch
            .cases
            .into_iter()
            .map(|case| match case {
                SwitchCase::Case { label, body } => SwitchCase::Case {
                    label,
                    body: visitor.visit_branch(body),
                },
                unrecognized @ SwitchCase::Unrecognized { .. } => unrecognized,
            })
            .collect(),
    }
}

/// `map_if` / `map_switch` for a branching expression, identity otherwise
pub fn map_branching<V: BranchVisitor + ?Sized>(visitor: &V, expr: Expr) -> Expr {
    match expr {
        Expr::If(if_expr) => Expr::If(map_if(visitor, if_expr)),
        Expr::Switch(switch) => Expr::Switch(map_switch(visitor, switch)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CaseLabel, Stmt};
    use std::cell::Cell;

    /// Tags each branch with a visit counter
    struct Counter {
        visits: Cell<i64>,
    }

    impl BranchVisitor for Counter {
        fn visit_condition(&self, condition: Expr) -> Expr {
            condition
        }

        fn visit_branch(&self, mut block: Block) -> Block {
            let n = self.visits.get();
            self.visits.set(n + 1);
            block.stmts.push(Stmt::Expr(Expr::integer(n)));
            block
        }
    }

    fn chain(depth: usize) -> IfExpr {
        let mut else_branch = Some(ElseBranch::Block(Block::default()));
        for i in (0..depth).rev() {
            else_branch = Some(ElseBranch::If(Box::new(IfExpr {
                condition: Box::new(Expr::ident(format!("c{i}"))),
                then_block: Block::default(),
                else_branch,
            })));
        }
        IfExpr {
            condition: Box::new(Expr::ident("c")),
            then_block: Block::default(),
            else_branch,
        }
    }

    #[test]
    fn test_every_else_if_visited_in_order() {
        let counter = Counter {
            visits: Cell::new(0),
        };
        let mapped = map_if(&counter, chain(3));
        // then + 3 else-ifs + final else
        assert_eq!(counter.visits.get(), 5);
        assert_eq!(mapped.then_block.stmts, vec![Stmt::Expr(Expr::integer(0))]);

        let mut current = mapped.else_branch;
        let mut expected = 1;
        while let Some(ElseBranch::If(nested)) = current {
            assert_eq!(nested.then_block.stmts, vec![Stmt::Expr(Expr::integer(expected))]);
            expected += 1;
            current = nested.else_branch;
        }
        match current {
            Some(ElseBranch::Block(block)) => {
                assert_eq!(block.stmts, vec![Stmt::Expr(Expr::integer(4))])
            }
            other => panic!("Expected final else, got {other:?}"),
        }
    }

    #[test]
    fn test_switch_unrecognized_case_passes_through() {
        let counter = Counter {
            visits: Cell::new(0),
        };
        let switch = SwitchExpr {
            subject: Box::new(Expr::ident("x")),
            cases: vec![
                SwitchCase::Case {
                    label: CaseLabel::Patterns(vec!["1".to_string()]),
                    body: Block::default(),
                },
                SwitchCase::Unrecognized {
                    text: "#if DEBUG\n#endif".to_string(),
                },
                SwitchCase::Case {
                    label: CaseLabel::Default,
                    body: Block::default(),
                },
            ],
        };
        let mapped = map_switch(&counter, switch);
        assert_eq!(counter.visits.get(), 2);
        assert_eq!(
            mapped.cases[1],
            SwitchCase::Unrecognized {
                text: "#if DEBUG\n#endif".to_string()
            }
        );
    }

    #[test]
    fn test_non_branching_is_identity() {
        let counter = Counter {
            visits: Cell::new(0),
        };
        assert_eq!(map_branching(&counter, Expr::ident("x")), Expr::ident("x"));
        assert_eq!(counter.visits.get(), 0);
    }
}

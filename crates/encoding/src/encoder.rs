// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL++ Encoder
//!
//! Walks a SQL++ tree and writes the S-expression consumed by the CAMP rule
//! pipeline.
//!
//! ## Output Shapes
//!
//! | Node | Encoding |
//! |------|----------|
//! | SELECT block | `(query (select <projections> ) (from <terms> ) [where] [groupBy] [having] )` |
//! | UNION / INTERSECT | `(query (union [(distinct )] <left> <right> ) )` |
//! | FROM term | `(table "t" )`, other sources encoded recursively, wrapped in `(aliasAs "x" … )` when aliased |
//! | Projection | `<expr>`, `(as "name" ) <expr>` when aliased, `(all )` for `*` |
//! | Variable | `(ref "x" )` |
//! | Field access | `(dot "bar" <expr> )` |
//! | Binary operator | `(<name> <lhs> <rhs> )` |
//! | Literal | integers and booleans bare, strings quoted |
//! | WHERE | `(where <expr> )` |
//! | GROUP BY | `(groupBy <keys> )`, each key `<expr>` or `(as "name" ) <expr>` |
//! | HAVING | `(having <expr> )` |
//!
//! Anything else fails the whole call. See [`EncodingError`].

use qcert_sqlpp::{
    Expr, FromClause, FromTerm, GroupbyClause, Literal, Node, NodeKind, OperatorExpr, Projection,
    Query, SelectBlock, SelectBody, SelectClause, SelectExpression, SelectSetOperation,
    SetOpType, SetOperationInput, Statement, VariableExpr,
};
use tracing::{debug, instrument, warn};

use crate::alias::{is_distinct_binding, is_distinct_name, strip_var_prefix};
use crate::config::EncoderConfig;
use crate::context::EncodingContext;
use crate::error::{EncodingError, EncodingResult};

/// SQL++ to S-expression encoder
///
/// The encoder holds only immutable configuration, so one instance can be
/// shared across threads; each call gets its own [`EncodingContext`].
#[derive(Debug, Clone, Default)]
pub struct SqlppEncoder {
    config: EncoderConfig,
}

impl SqlppEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a query
    pub fn encode_query(&self, query: &Query) -> EncodingResult<String> {
        self.encode_to_string(Node::Query(query))
    }

    /// Encode a statement; only query statements have an encoding
    pub fn encode_statement(&self, statement: &Statement) -> EncodingResult<String> {
        self.encode_to_string(Node::Statement(statement))
    }

    /// Encode any node into a fresh buffer
    ///
    /// The output has no trailing separator. On error nothing is returned.
    #[instrument(skip(self, node), fields(kind = %node.kind()))]
    pub fn encode_to_string(&self, node: Node<'_>) -> EncodingResult<String> {
        debug!("Encoding started");
        let mut ctx = EncodingContext::with_max_depth(self.config.max_depth);
        self.encode(&mut ctx, node)?;
        let output = ctx.finish();
        debug!(len = output.len(), "Encoding finished");
        Ok(output)
    }

    /// Append the encoding of `node` to the context's buffer
    pub fn encode(&self, ctx: &mut EncodingContext, node: Node<'_>) -> EncodingResult<()> {
        ctx.enter(node.kind())?;
        let result = self.dispatch(ctx, node);
        ctx.exit();
        result
    }

    fn dispatch(&self, ctx: &mut EncodingContext, node: Node<'_>) -> EncodingResult<()> {
        match node {
            Node::Statement(statement) => self.statement(ctx, statement),
            Node::Query(query) => self.query(ctx, query),
            Node::Expr(expr) => self.expr(ctx, expr),
            Node::Literal(literal) => self.literal(ctx, literal),
            Node::Variable(var) => self.variable(ctx, var),
            Node::Operator(op) => self.operator(ctx, op),
            Node::SelectExpression(select) => self.select_expression(ctx, select),
            Node::SelectSetOperation(set_op) => self.set_operation(ctx, set_op),
            Node::SelectBlock(block) => self.select_block(ctx, block),
            Node::SelectClause(clause) => self.select_clause(ctx, clause),
            Node::SelectElement(_) => unsupported(NodeKind::SelectElement, "SELECT VALUE"),
            Node::SelectRegular(regular) => {
                for projection in &regular.projections {
                    self.encode(ctx, Node::Projection(projection))?;
                }
                Ok(())
            }
            Node::Projection(projection) => self.projection(ctx, projection),
            Node::FromClause(from) => self.from_clause(ctx, from),
            Node::FromTerm(term) => self.from_term(ctx, term),
            Node::Correlate(clause) => unsupported(clause.kind(), "correlated clauses"),
            Node::Where(clause) => self.wrapped(ctx, "where", &clause.expr),
            Node::GroupBy(clause) => self.group_by(ctx, clause),
            Node::Having(clause) => self.wrapped(ctx, "having", &clause.expr),
            Node::OrderBy(_) => unsupported(NodeKind::OrderbyClause, "ORDER BY"),
            Node::Limit(_) => unsupported(NodeKind::LimitClause, "LIMIT"),
            Node::Let(_) => unsupported(NodeKind::LetClause, "LET"),
        }
    }

    fn statement(&self, ctx: &mut EncodingContext, statement: &Statement) -> EncodingResult<()> {
        match statement {
            Statement::Query(query) => self.query(ctx, query),
            other => unsupported(other.kind(), "only query statements can be encoded"),
        }
    }

    fn query(&self, ctx: &mut EncodingContext, query: &Query) -> EncodingResult<()> {
        match &query.body {
            Expr::Select(select) => self.encode(ctx, Node::SelectExpression(select.as_ref())),
            other => unsupported(other.kind(), "query body must be a select expression"),
        }
    }

    fn expr(&self, ctx: &mut EncodingContext, expr: &Expr) -> EncodingResult<()> {
        match expr {
            Expr::Literal(literal) => self.literal(ctx, literal),
            Expr::Variable(var) => self.variable(ctx, var),
            Expr::Operator(op) => self.operator(ctx, op),
            Expr::FieldAccessor { expr: inner, field } => {
                ctx.out().open_with_string("dot", field);
                self.encode(ctx, Node::Expr(inner.as_ref()))?;
                ctx.out().close();
                Ok(())
            }
            Expr::Select(select) => self.select_expression(ctx, select),
            Expr::IndexAccessor { .. }
            | Expr::Call { .. }
            | Expr::Case { .. }
            | Expr::If { .. }
            | Expr::ListConstructor { .. }
            | Expr::RecordConstructor(_)
            | Expr::Quantified { .. }
            | Expr::Unary { .. }
            | Expr::IndependentSubquery(_) => {
                unsupported(expr.kind(), "no encoding for this expression")
            }
        }
    }

    /// Integers, longs and booleans are written bare.
    ///
    /// String literals are quoted and escaped like every other string
    /// argument, so a value containing a space or `)` reads back as one
    /// token. Do not write them raw.
    fn literal(&self, ctx: &mut EncodingContext, literal: &Literal) -> EncodingResult<()> {
        match literal {
            Literal::Integer(_) | Literal::Long(_) | Literal::True | Literal::False => {
                ctx.out().atom(literal.string_value());
                Ok(())
            }
            Literal::String(value) => {
                ctx.out().string(value);
                Ok(())
            }
            Literal::Double(_) | Literal::Float(_) | Literal::Null | Literal::Missing => {
                unsupported(
                    NodeKind::LiteralExpr,
                    format!("literals of type {}", literal.literal_type()),
                )
            }
        }
    }

    fn variable(&self, ctx: &mut EncodingContext, var: &VariableExpr) -> EncodingResult<()> {
        ctx.out().string_node("ref", strip_var_prefix(var.name()));
        Ok(())
    }

    fn operator(&self, ctx: &mut EncodingContext, op: &OperatorExpr) -> EncodingResult<()> {
        let ([lhs, rhs], [operator]) = (op.exprs.as_slice(), op.ops.as_slice()) else {
            return malformed(
                NodeKind::OperatorExpr,
                format!(
                    "expected a binary expression, found {} operands and {} operators",
                    op.exprs.len(),
                    op.ops.len()
                ),
            );
        };
        let Some(name) = self.config.operator_names.get(*operator) else {
            return unsupported(
                NodeKind::OperatorExpr,
                format!("binary operator {:?} ({})", operator, operator),
            );
        };

        ctx.out().open(name);
        self.encode(ctx, Node::Expr(lhs))?;
        self.encode(ctx, Node::Expr(rhs))?;
        ctx.out().close();
        Ok(())
    }

    fn select_expression(
        &self,
        ctx: &mut EncodingContext,
        select: &SelectExpression,
    ) -> EncodingResult<()> {
        if let Some(clause) = select.let_list.first() {
            return self.encode(ctx, Node::Let(clause));
        }
        self.encode(ctx, Node::SelectSetOperation(&select.select_set_operation))?;
        if let Some(order_by) = &select.order_by {
            self.encode(ctx, Node::OrderBy(order_by))?;
        }
        if let Some(limit) = &select.limit {
            self.encode(ctx, Node::Limit(limit))?;
        }
        Ok(())
    }

    fn set_operation(
        &self,
        ctx: &mut EncodingContext,
        set_op: &SelectSetOperation,
    ) -> EncodingResult<()> {
        let rights = &set_op.rights;
        if rights.len() > self.config.max_set_operation_rights {
            return malformed(
                NodeKind::SelectSetOperation,
                format!(
                    "{} right inputs, at most {} supported",
                    rights.len(),
                    self.config.max_set_operation_rights
                ),
            );
        }
        let mut tags = Vec::with_capacity(rights.len());
        for right in rights {
            tags.push(match right.op_type {
                SetOpType::Union => "union",
                SetOpType::Intersect => "intersect",
                SetOpType::Except => {
                    return unsupported(NodeKind::SelectSetOperation, "EXCEPT");
                }
            });
        }

        // Left-associative: the last right input is the outermost node
        for (right, tag) in rights.iter().zip(&tags).rev() {
            ctx.out().open("query").open(tag);
            if right.set_semantics {
                ctx.out().empty_node("distinct");
            }
        }
        self.set_operation_input(ctx, &set_op.left)?;
        for right in rights {
            self.set_operation_input(ctx, &right.input)?;
            ctx.out().close().close();
        }
        Ok(())
    }

    fn set_operation_input(
        &self,
        ctx: &mut EncodingContext,
        input: &SetOperationInput,
    ) -> EncodingResult<()> {
        match input {
            SetOperationInput::Select(block) => self.encode(ctx, Node::SelectBlock(block.as_ref())),
            SetOperationInput::Subquery(select) => {
                self.encode(ctx, Node::SelectExpression(select.as_ref()))
            }
        }
    }

    fn select_block(&self, ctx: &mut EncodingContext, block: &SelectBlock) -> EncodingResult<()> {
        let Some(from) = &block.from else {
            return malformed(NodeKind::SelectBlock, "missing FROM clause");
        };

        ctx.out().open("query").open("select");
        self.encode(ctx, Node::SelectClause(&block.select_clause))?;
        ctx.out().close();
        self.encode(ctx, Node::FromClause(from))?;
        if let Some(clause) = &block.where_clause {
            self.encode(ctx, Node::Where(clause))?;
        }
        if let Some(clause) = &block.group_by {
            self.encode(ctx, Node::GroupBy(clause))?;
        }
        if let Some(clause) = &block.having {
            self.encode(ctx, Node::Having(clause))?;
        }
        ctx.out().close();
        Ok(())
    }

    fn select_clause(&self, ctx: &mut EncodingContext, clause: &SelectClause) -> EncodingResult<()> {
        if clause.distinct {
            ctx.out().empty_node("distinct");
        }
        match &clause.body {
            SelectBody::Element(element) => self.encode(ctx, Node::SelectElement(element)),
            SelectBody::Regular(regular) => self.encode(ctx, Node::SelectRegular(regular)),
        }
    }

    fn projection(&self, ctx: &mut EncodingContext, projection: &Projection) -> EncodingResult<()> {
        match (&projection.expr, projection.star) {
            (Some(expr), _) => {
                let alias = projection
                    .name
                    .as_deref()
                    .filter(|name| is_distinct_name(name, expr));
                self.aliased(ctx, "as", alias, expr)
            }
            (None, true) => {
                ctx.out().empty_node("all");
                Ok(())
            }
            (None, false) => malformed(
                NodeKind::Projection,
                "projection has neither an expression nor a star",
            ),
        }
    }

    fn from_clause(&self, ctx: &mut EncodingContext, from: &FromClause) -> EncodingResult<()> {
        ctx.out().open("from");
        for term in &from.terms {
            self.encode(ctx, Node::FromTerm(term))?;
        }
        ctx.out().close();
        Ok(())
    }

    fn from_term(&self, ctx: &mut EncodingContext, term: &FromTerm) -> EncodingResult<()> {
        if let Some(clause) = term.correlate_clauses.first() {
            return unsupported(clause.kind(), "correlated clauses in a FROM term");
        }
        if term.positional_var.is_some() {
            return unsupported(NodeKind::FromTerm, "positional variables in a FROM term");
        }

        let aliased = is_distinct_binding(&term.left_var, &term.left_expr);
        if aliased {
            ctx.out()
                .open_with_string("aliasAs", strip_var_prefix(term.left_var.name()));
        }
        match term.left_expr.as_variable() {
            // A bare variable source names a table
            Some(source) => {
                ctx.out()
                    .string_node("table", strip_var_prefix(source.name()));
            }
            None => self.encode(ctx, Node::Expr(&term.left_expr))?,
        }
        if aliased {
            ctx.out().close();
        }
        Ok(())
    }

    fn group_by(&self, ctx: &mut EncodingContext, clause: &GroupbyClause) -> EncodingResult<()> {
        if clause.group_var.is_some() {
            return unsupported(NodeKind::GroupbyClause, "GROUP AS");
        }

        ctx.out().open("groupBy");
        for key in &clause.keys {
            let alias = key
                .var
                .as_ref()
                .map(|var| strip_var_prefix(var.name()))
                .filter(|name| is_distinct_name(name, &key.expr));
            self.aliased(ctx, "as", alias, &key.expr)?;
        }
        ctx.out().close();
        Ok(())
    }

    /// `(tag <expr> )`
    fn wrapped(&self, ctx: &mut EncodingContext, tag: &str, expr: &Expr) -> EncodingResult<()> {
        ctx.out().open(tag);
        self.encode(ctx, Node::Expr(expr))?;
        ctx.out().close();
        Ok(())
    }

    /// `<expr>`, preceded by a closed `(tag "alias" )` node when an alias is given
    ///
    /// The alias node and the expression are siblings; the downstream parser
    /// pairs a name node with the expression that follows it.
    fn aliased(
        &self,
        ctx: &mut EncodingContext,
        tag: &str,
        alias: Option<&str>,
        expr: &Expr,
    ) -> EncodingResult<()> {
        if let Some(alias) = alias {
            ctx.out().string_node(tag, alias);
        }
        self.encode(ctx, Node::Expr(expr))
    }
}

fn unsupported<T>(kind: NodeKind, detail: impl Into<String>) -> EncodingResult<T> {
    let err = EncodingError::unsupported(kind, detail);
    warn!(error = %err, "Encoding aborted");
    Err(err)
}

fn malformed<T>(kind: NodeKind, detail: impl Into<String>) -> EncodingResult<T> {
    let err = EncodingError::malformed(kind, detail);
    warn!(error = %err, "Encoding aborted");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcert_sqlpp::{OperatorType, VarIdentifier};

    fn encode_expr(expr: &Expr) -> EncodingResult<String> {
        SqlppEncoder::default().encode_to_string(Node::Expr(expr))
    }

    #[test]
    fn test_variable_strips_prefix() {
        assert_eq!(encode_expr(&Expr::var("$x")).unwrap(), r#"(ref "x" )"#);
        assert_eq!(encode_expr(&Expr::var("y")).unwrap(), r#"(ref "y" )"#);
    }

    #[test]
    fn test_literals() {
        assert_eq!(encode_expr(&Expr::int(42)).unwrap(), "42");
        assert_eq!(
            encode_expr(&Expr::Literal(Literal::Long(-3))).unwrap(),
            "-3"
        );
        assert_eq!(encode_expr(&Expr::Literal(Literal::True)).unwrap(), "true");
        assert_eq!(encode_expr(&Expr::string("a\"b")).unwrap(), r#""a\"b""#);
    }

    #[test]
    fn test_unsupported_literal() {
        let err = encode_expr(&Expr::Literal(Literal::Double(1.5))).unwrap_err();
        assert_eq!(err.kind(), Some(NodeKind::LiteralExpr));
        assert!(err.to_string().contains("DOUBLE"));

        let err = encode_expr(&Expr::Literal(Literal::Null)).unwrap_err();
        assert!(err.to_string().contains("NULL"));
    }

    #[test]
    fn test_binary_operator() {
        let expr = Expr::binary(Expr::var("$x"), OperatorType::Eq, Expr::int(1));
        assert_eq!(encode_expr(&expr).unwrap(), r#"(equal (ref "x" ) 1 )"#);
    }

    #[test]
    fn test_non_binary_operator_is_malformed() {
        let expr = Expr::Operator(OperatorExpr {
            exprs: vec![Expr::int(1), Expr::int(2), Expr::int(3)],
            ops: vec![OperatorType::Gt, OperatorType::Gt],
        });
        let err = encode_expr(&expr).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::Malformed {
                kind: NodeKind::OperatorExpr,
                ..
            }
        ));
    }

    #[test]
    fn test_field_accessor() {
        let expr = Expr::field(Expr::var("$x"), "bar");
        assert_eq!(encode_expr(&expr).unwrap(), r#"(dot "bar" (ref "x" ) )"#);
    }

    #[test]
    fn test_unsupported_expression_kinds() {
        let call = Expr::Call {
            function: "count".into(),
            args: vec![Expr::var("$x")],
        };
        assert_eq!(
            encode_expr(&call).unwrap_err().kind(),
            Some(NodeKind::CallExpr)
        );

        let index = Expr::IndexAccessor {
            expr: Box::new(Expr::var("$x")),
            index: None,
        };
        assert_eq!(
            encode_expr(&index).unwrap_err().kind(),
            Some(NodeKind::IndexAccessor)
        );
    }

    #[test]
    fn test_from_term_named_value_binding_is_aliased() {
        let term = FromTerm::new(
            Expr::var("$t"),
            VariableExpr::from_identifier(VarIdentifier::named_value("$t")),
        );
        let out = SqlppEncoder::default()
            .encode_to_string(Node::FromTerm(&term))
            .unwrap();
        assert_eq!(out, r#"(aliasAs "t" (table "t" ) )"#);
    }

    #[test]
    fn test_projection_alias_is_sibling_node() {
        let projection = Projection::named(Expr::field(Expr::var("$x"), "bar"), "y");
        let out = SqlppEncoder::default()
            .encode_to_string(Node::Projection(&projection))
            .unwrap();
        assert_eq!(out, r#"(as "y" ) (dot "bar" (ref "x" ) )"#);

        let elided = Projection::named(Expr::var("$x"), "x");
        let out = SqlppEncoder::default()
            .encode_to_string(Node::Projection(&elided))
            .unwrap();
        assert_eq!(out, r#"(ref "x" )"#);
    }

    #[test]
    fn test_depth_limit() {
        let mut expr = Expr::var("$x");
        for i in 0..10 {
            expr = Expr::field(expr, format!("f{}", i));
        }
        let encoder = SqlppEncoder::new(EncoderConfig::default().with_max_depth(5));
        let err = encoder.encode_to_string(Node::Expr(&expr)).unwrap_err();
        assert_eq!(
            err,
            EncodingError::RecursionLimitExceeded { depth: 6, limit: 5 }
        );

        assert!(SqlppEncoder::default()
            .encode_to_string(Node::Expr(&expr))
            .is_ok());
    }
}

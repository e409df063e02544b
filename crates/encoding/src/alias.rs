// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Alias Elision
//!
//! The SQL++ parser names every projection and binds every FROM term, even
//! when the name merely repeats a variable: `SELECT x FROM t` arrives as
//! `SELECT $x AS x FROM $t AS $t`. The encoder only writes an explicit alias
//! when it carries information.
//!
//! An alias is redundant when all of the following hold:
//! 1. the expression is a plain variable reference
//! 2. the reference does not introduce a new variable
//! 3. the identifier is not a named-value access
//! 4. the reference is exactly `$` followed by the alias

use qcert_sqlpp::{Expr, VariableExpr};

/// Strip the parser's `$` variable prefix, if present
pub fn strip_var_prefix(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// Whether `name` must be written as an explicit alias for `expr`
pub fn is_distinct_name(name: &str, expr: &Expr) -> bool {
    let Some(var) = expr.as_variable() else {
        return true;
    };
    if var.is_new_var || var.var.named_value_access {
        return true;
    }
    var.name().strip_prefix('$') != Some(name)
}

/// Whether the binding variable of a FROM term must be written as an alias
pub fn is_distinct_binding(binding: &VariableExpr, expr: &Expr) -> bool {
    if binding.var.named_value_access {
        return true;
    }
    is_distinct_name(strip_var_prefix(binding.name()), expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcert_sqlpp::{VarIdentifier, VariableExpr};

    #[test]
    fn test_strip_var_prefix() {
        assert_eq!(strip_var_prefix("$x"), "x");
        assert_eq!(strip_var_prefix("x"), "x");
        assert_eq!(strip_var_prefix("$$x"), "$x");
        assert_eq!(strip_var_prefix(""), "");
    }

    #[test]
    fn test_same_name_is_elided() {
        assert!(!is_distinct_name("x", &Expr::var("$x")));
    }

    #[test]
    fn test_different_name_is_kept() {
        assert!(is_distinct_name("y", &Expr::var("$x")));
    }

    #[test]
    fn test_unprefixed_reference_is_kept() {
        assert!(is_distinct_name("x", &Expr::var("x")));
    }

    #[test]
    fn test_new_var_is_kept() {
        let expr = Expr::Variable(VariableExpr::new("$x").as_new_var());
        assert!(is_distinct_name("x", &expr));
    }

    #[test]
    fn test_named_value_access_is_kept() {
        let expr = Expr::Variable(VariableExpr::from_identifier(VarIdentifier::named_value("$x")));
        assert!(is_distinct_name("x", &expr));
    }

    #[test]
    fn test_non_variable_is_kept() {
        let expr = Expr::field(Expr::var("$x"), "bar");
        assert!(is_distinct_name("bar", &expr));
        assert!(is_distinct_name("x", &Expr::int(1)));
    }

    #[test]
    fn test_binding() {
        assert!(!is_distinct_binding(&VariableExpr::new("$x"), &Expr::var("$x")));
        assert!(is_distinct_binding(&VariableExpr::new("$y"), &Expr::var("$x")));

        let named = VariableExpr::from_identifier(VarIdentifier::named_value("$x"));
        assert!(is_distinct_binding(&named, &Expr::var("$x")));
    }
}

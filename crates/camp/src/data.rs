// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Constant data values carried by `pconst` patterns

use serde::{Deserialize, Serialize};

use crate::sexp::{SExprWriter, WriteSExpr};

/// A CAMP data value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Data {
    Unit,
    Bool(bool),
    Nat(i64),
    String(String),
    /// Bag (unordered collection)
    Coll(Vec<Data>),
    /// Record, fields kept in insertion order
    Rec(Vec<(String, Data)>),
}

impl Data {
    pub fn string(value: impl Into<String>) -> Self {
        Data::String(value.into())
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Data)>) -> Self {
        Data::Rec(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl WriteSExpr for Data {
    fn write_sexpr(&self, out: &mut SExprWriter) {
        match self {
            Data::Unit => {
                out.empty_node("dunit");
            }
            Data::Bool(b) => {
                out.open("dbool").atom(b).close();
            }
            Data::Nat(n) => {
                out.open("dnat").atom(n).close();
            }
            Data::String(s) => {
                out.string_node("dstring", s);
            }
            Data::Coll(items) => {
                out.open("dcoll");
                for item in items {
                    item.write_sexpr(out);
                }
                out.close();
            }
            Data::Rec(fields) => {
                out.open("drec");
                for (name, value) in fields {
                    out.open_with_string("field", name);
                    value.write_sexpr(out);
                    out.close();
                }
                out.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(Data::Unit.to_sexpr(), "(dunit )");
        assert_eq!(Data::Nat(7).to_sexpr(), "(dnat 7 )");
        assert_eq!(Data::Bool(false).to_sexpr(), "(dbool false )");
        assert_eq!(Data::string("a").to_sexpr(), r#"(dstring "a" )"#);
    }

    #[test]
    fn test_record_rendering() {
        let rec = Data::record([("id", Data::Nat(1)), ("tags", Data::Coll(vec![]))]);
        assert_eq!(
            rec.to_sexpr(),
            r#"(drec (field "id" (dnat 1 ) ) (field "tags" (dcoll ) ) )"#
        );
    }
}

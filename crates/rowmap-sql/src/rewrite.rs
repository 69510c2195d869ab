use rowmap_core::param::ParameterSet;
use rowmap_core::{Error, Result};

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Replaces each `@@name` occurrence with the raw string rendition of the
/// matching parameter's value.
///
/// The value is inlined into the SQL text, not bound: this is what makes
/// `IN (@@ids)` with a list value work. It also means the caller is
/// inlining untrusted text into a statement if the value came from user
/// input; restrict literal-substitution tokens to values you control.
///
/// Null-valued parameters are not substituted; the token is left in the
/// text for the caller or dialect to resolve. Tokens with no matching
/// parameter are left untouched.
pub fn substitute_literals(sql: &str, params: &ParameterSet) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut remainder = sql;

    while let Some(pos) = remainder.find("@@") {
        out.push_str(&remainder[..pos]);
        let after = &remainder[pos + 2..];

        let ident_len = after
            .bytes()
            .take_while(|byte| is_ident_byte(*byte))
            .count();
        if ident_len > 0 {
            let name = format!("@{}", &after[..ident_len]);
            let fragment = params
                .get(&name)
                .and_then(|entry| entry.value().literal_fragment());
            if let Some(fragment) = fragment {
                out.push_str(&fragment);
                remainder = &after[ident_len..];
                continue;
            }
        }

        out.push_str("@@");
        remainder = after;
    }

    out.push_str(remainder);
    out
}

/// Validates that the first whitespace-delimited word of `query` is the
/// expected statement keyword, case-insensitively.
pub fn validate_query_type(query: &str, expected: &str) -> Result<()> {
    let keyword = query.trim().split_whitespace().next().unwrap_or("");
    if keyword.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(Error::usage(format!(
            "the query passed was not a {expected} query: starts with {keyword:?}"
        )))
    }
}

/// Wraps a select statement so it returns its total row count.
pub fn count_query(query: &str) -> Result<String> {
    validate_query_type(query, "select")?;
    Ok(format!("SELECT COUNT(*) FROM ({query}) q"))
}

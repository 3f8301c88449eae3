use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Backend engines the signature table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbEngine {
    MySql,
    Postgres,
    Mssql,
    Oracle,
}

impl DbEngine {
    pub fn name(&self) -> &'static str {
        match self {
            DbEngine::MySql => "MySQL",
            DbEngine::Postgres => "PostgreSQL",
            DbEngine::Mssql => "MSSQL",
            DbEngine::Oracle => "Oracle",
        }
    }
}

pub struct EngineSignature {
    pub engine: DbEngine,
    pub patterns: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("invalid signature pattern"))
        .collect()
}

/// Error-string signature table, ordered. Adding an engine is a data change
/// here, not a code change in the fingerprinter or classifier.
pub static ENGINE_SIGNATURES: Lazy<Vec<EngineSignature>> = Lazy::new(|| {
    vec![
        EngineSignature {
            engine: DbEngine::MySql,
            patterns: compile(&[
                r"you have an error in your sql syntax",
                r"mysql",
                r"supplied argument is not a valid mysql",
            ]),
        },
        EngineSignature {
            engine: DbEngine::Postgres,
            patterns: compile(&[
                r"pg_query",
                r"pg_exec",
                r"postgresql",
                r"syntax error at or near",
            ]),
        },
        EngineSignature {
            engine: DbEngine::Mssql,
            patterns: compile(&[
                r"microsoft sql",
                r"unclosed quotation mark",
                r"incorrect syntax near",
            ]),
        },
        EngineSignature {
            engine: DbEngine::Oracle,
            patterns: compile(&[
                r"ora-\d+",
                r"oracle",
                r"quoted string not properly terminated",
            ]),
        },
    ]
});

/// First engine in table order with any pattern matching the body.
pub fn match_engine(body: &str) -> Option<DbEngine> {
    for sig in ENGINE_SIGNATURES.iter() {
        if sig.patterns.iter().any(|p| p.is_match(body)) {
            return Some(sig.engine);
        }
    }
    None
}

/// Whether any engine's error signature appears in the body.
pub fn matches_any(body: &str) -> bool {
    match_engine(body).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_compiles_and_covers_four_engines() {
        assert_eq!(ENGINE_SIGNATURES.len(), 4);
        assert!(ENGINE_SIGNATURES.iter().all(|s| !s.patterns.is_empty()));
    }

    #[test]
    fn signature_match_is_case_insensitive() {
        assert_eq!(
            match_engine("You Have an Error in Your SQL Syntax"),
            Some(DbEngine::MySql)
        );
    }
}

// crates/nostrust-cli/src/interactive.rs
//
// Prompt loop: score identities typed by the user against a finished ledger.

use std::io::{self, BufRead, Write};

use nostrust_core::{Identity, NameResolver, SocialGraphSource};
use nostrust_reputation::ranker::{format_entry, RankedEntry};
use nostrust_reputation::{Ledger, TrustEngine};

pub const PROMPT: &str = "Enter a npub to get its rating, or 'x' to exit: ";

/// Read keys from `input` until `x` or end of input, printing one rating line
/// per key. Keys that fail to decode are reported and the prompt repeats.
pub async fn run<S, R, I, W>(
    engine: &TrustEngine<S>,
    resolver: &R,
    ledger: &Ledger,
    mut input: I,
    out: &mut W,
    resolve_names: bool,
) -> io::Result<()>
where
    S: SocialGraphSource + ?Sized,
    R: NameResolver + ?Sized,
    I: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let typed = line.trim();
        if typed == "x" {
            return Ok(());
        }
        if typed.is_empty() {
            continue;
        }

        let identity: Identity = match typed.parse() {
            Ok(identity) => identity,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let score = engine.lookup(ledger, identity).await;
        let npub = identity.to_npub();
        let display_name = if resolve_names {
            Some(resolver.display_name(&identity).await)
        } else {
            None
        };
        let entry = RankedEntry {
            identity,
            npub,
            score,
            display_name,
        };
        writeln!(out, "{}", format_entry(&entry))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use nostrust_core::{EngineConfig, MemoryGraph};

    fn id(n: u8) -> Identity {
        Identity::from_bytes([n; 32])
    }

    async fn session(graph: MemoryGraph, seed: Identity, typed: &str, names: bool) -> String {
        let graph = Arc::new(graph);
        let engine = TrustEngine::new(EngineConfig::default(), graph.clone()).unwrap();
        let ledger = engine.run(seed).await.unwrap();
        let mut out = Vec::new();
        run(&engine, graph.as_ref(), &ledger, Cursor::new(typed.to_string()), &mut out, names)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn looks_up_until_exit() {
        let graph = MemoryGraph::new()
            .with_follows(id(1), [id(2)])
            .with_name(id(2), "bob");
        let typed = format!("{}\nx\n{}\n", id(2).to_npub(), id(1).to_npub());
        let out = session(graph, id(1), &typed, true).await;

        assert!(out.contains(&format!("{}  1.0000000000  bob\n", id(2).to_npub())));
        // Nothing after "x" is looked up.
        assert_eq!(out.matches(PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn accepts_hex_and_reports_unscored_as_zero() {
        let out = session(MemoryGraph::new(), id(1), &format!("{}\nx\n", id(9).to_hex()), false).await;
        let npub = id(9).to_npub();
        assert!(out.contains(&format!("{}  0.0000000000  {}\n", npub, npub)));
    }

    #[tokio::test]
    async fn invalid_input_reprompts() {
        let out = session(MemoryGraph::new(), id(1), "npub1nonsense\n\nx\n", false).await;
        assert!(out.contains("Invalid identity"));
        assert_eq!(out.matches(PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn end_of_input_exits() {
        let out = session(MemoryGraph::new(), id(1), "", false).await;
        assert_eq!(out, format!("{}\n", PROMPT));
    }

    #[tokio::test]
    async fn lookups_include_untrusted_reports() {
        let graph = MemoryGraph::new()
            .with_follows(id(1), [id(2)])
            .with_reports(id(50), [id(2)]);
        let out = session(graph, id(1), &format!("{}\nx\n", id(2).to_hex()), false).await;
        assert!(out.contains("  0.9999990000  "));
    }
}

//! Canned replies and random selection.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::*;
use rand::rngs::StdRng;

/// Reply sent when a mention talks about design documents.
pub const DESIGN_REBUKE: &str = " c'est quoi encore ce design ?! ";

/// Words that trigger the design rebuke. Matching is case-sensitive.
pub const DESIGN_KEYWORDS: &[&str] = &["design", "doc"];

/// Number of canned replies.
pub const RESPONSE_COUNT: usize = 17;

/// Build the candidate list.
///
/// The fifth entry points at the configured distinguished user. The mention
/// of `UH6CBAXQD` is a fixed user and does not follow configuration.
pub fn candidate_responses(author_id: &str) -> [String; RESPONSE_COUNT] {
    [
        "Il me faut un doc de design de Bot avant de pouvoir répondre !".to_string(),
        "CALMEZ-VOUS !".to_string(),
        "il parait qu'il y a une réponse sur confluence".to_string(),
        "ouais mais en fait non !".to_string(),
        format!("va voir ça avec <@{}>...", author_id),
        "ma réponse sera 42".to_string(),
        "quoi ? Moi ? non, j'ai rien à voir avec ça...".to_string(),
        "ok".to_string(),
        "Et bah tu sais quoi ? parquoi pas tiens !".to_string(),
        "mmmh... On va demander au PO d'abord".to_string(),
        "Quand il y aura à nouveau du cidre chez oscar".to_string(),
        "tu vois comment épeler le mot lapin? Bah voilà c'est presque pareil".to_string(),
        "attend je vais demander à <@UH6CBAXQD>...".to_string(),
        "ou sinon, on s'écoute un petit Bob Marley OKLM".to_string(),
        "Pas bête !".to_string(),
        "Et tu as pensé ça tout seul ? bravo !".to_string(),
        "Je m'énerve pas, J'EXPLIQUE !".to_string(),
    ]
}

/// Generator seeded from the wall clock, created fresh for every reply.
///
/// Not suitable for anything security related.
pub fn wall_clock_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    StdRng::seed_from_u64(nanos as u64)
}

/// Pick one reply uniformly at random.
pub fn pick_response<R: Rng>(author_id: &str, rng: &mut R) -> String {
    let mut candidates = candidate_responses(author_id);
    let n = rng.gen_range(0..candidates.len());
    std::mem::take(&mut candidates[n])
}

/// Whether the text mentions design documents.
pub fn mentions_design(text: &str) -> bool {
    DESIGN_KEYWORDS.iter().any(|k| text.contains(k))
}

//! Random test data.

use rand::Rng;
use rand::distr::Alphanumeric;
use rand::seq::IndexedRandom;

/// Length of a session public key.
pub const PUBLIC_KEY_LEN: usize = 64;

/// A random 64-character ASCII alphanumeric public key.
pub fn public_key() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(PUBLIC_KEY_LEN)
        .map(char::from)
        .collect()
}

const ABBREVIATIONS: &[&str] = &[
    "TCP", "HTTP", "SDD", "RAM", "GB", "CSS", "SSL", "AGP", "SQL", "FTP", "PCI", "AI", "ADP",
    "RSS", "XML", "EXE", "COM", "HDD", "THX", "SMTP", "SMS", "USB", "PNG", "SAS", "IB", "SCSI",
    "JSON", "XSS", "JBOD",
];

const ADJECTIVES: &[&str] = &[
    "auxiliary", "primary", "back-end", "digital", "open-source", "virtual", "cross-platform",
    "redundant", "online", "haptic", "multi-byte", "bluetooth", "wireless", "1080p", "neural",
    "optical", "solid state", "mobile",
];

const NOUNS: &[&str] = &[
    "driver", "protocol", "bandwidth", "panel", "microchip", "program", "port", "card", "array",
    "interface", "system", "sensor", "firewall", "hard drive", "pixel", "alarm", "feed",
    "monitor", "application", "transmitter", "bus", "circuit", "capacitor", "matrix",
];

const VERBS: &[&str] = &[
    "back up", "bypass", "hack", "override", "compress", "copy", "navigate", "index", "connect",
    "generate", "quantify", "calculate", "synthesize", "input", "transmit", "program", "reboot",
    "parse",
];

const INGVERBS: &[&str] = &[
    "backing up", "bypassing", "hacking", "overriding", "compressing", "copying", "navigating",
    "indexing", "connecting", "generating", "quantifying", "calculating", "synthesizing",
    "transmitting", "programming", "parsing",
];

fn pick(rng: &mut impl Rng, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// A random technobabble sentence, used as a message body.
pub fn hacker_phrase() -> String {
    let mut rng = rand::rng();
    let abbreviation = pick(&mut rng, ABBREVIATIONS);
    let adjective = pick(&mut rng, ADJECTIVES);
    let noun = pick(&mut rng, NOUNS);
    let verb = pick(&mut rng, VERBS);
    let ingverb = pick(&mut rng, INGVERBS);
    match rng.random_range(0..4) {
        0 => format!("If we {verb} the {noun}, we can get to the {abbreviation} {noun} through the {adjective} {abbreviation} {noun}!"),
        1 => format!("We need to {verb} the {adjective} {abbreviation} {noun}!"),
        2 => format!("Try to {verb} the {abbreviation} {noun}, maybe it will {verb} the {adjective} {noun}!"),
        _ => format!("I'll {verb} the {adjective} {abbreviation} {noun}, that should {noun} the {abbreviation} {noun}! {ingverb} the {noun} won't do anything."),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

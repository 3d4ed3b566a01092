//! Shared tokenization for the local providers.

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from", "has",
    "have", "how", "i", "if", "in", "into", "is", "it", "its", "my", "of", "on", "or", "our",
    "should", "so", "that", "the", "their", "them", "these", "this", "to", "under", "we", "what",
    "when", "which", "with", "within", "you", "your",
];

/// Lowercase alphanumeric terms, stopwords removed, plural `s` stripped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() >= 2)
        .map(str::to_lowercase)
        .filter(|s| !STOPWORDS.contains(&s.as_str()))
        .map(stem)
        .collect()
}

/// Light stemming: "failures" and "failure" share a bucket.
fn stem(term: String) -> String {
    if term.len() > 3 && term.ends_with('s') && !term.ends_with("ss") {
        term[..term.len() - 1].to_string()
    } else {
        term
    }
}

/// Hash a term into a bucket index using FNV-1a.
pub fn hash_term(term: &str, buckets: usize) -> usize {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in term.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    (h as usize) % buckets.max(1)
}

/// Scale to unit L2 norm in place; zero vectors stay zero.
pub fn l2_normalize(vec: &mut [f32]) {
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vec.iter_mut() {
            *v /= norm;
        }
    }
}

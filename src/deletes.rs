use std::collections::HashSet;

///Trait for objects that can produce symmetric-delete variants (string-like)
pub trait DeleteVariants {
    fn delete_variants(&self, prefix_length: usize, max_edit_distance: usize) -> HashSet<String>;
}

impl DeleteVariants for str {
    ///All strings obtainable from the prefix (the first `prefix_length`
    ///codepoints) by deleting between 1 and `max_edit_distance` codepoints,
    ///plus the prefix itself. The empty string is included when the prefix
    ///is short enough to be deleted away entirely.
    fn delete_variants(&self, prefix_length: usize, max_edit_distance: usize) -> HashSet<String> {
        let mut variants: HashSet<String> = HashSet::new();
        let chars: Vec<char> = self.chars().collect();
        let prefix: &[char] = if chars.len() > prefix_length {
            &chars[..prefix_length]
        } else {
            &chars
        };
        if prefix.len() <= max_edit_distance {
            variants.insert(String::new());
        }
        variants.insert(prefix.iter().collect());
        collect_deletes(prefix, max_edit_distance, &mut variants);
        variants
    }
}

///Recursively delete single codepoints, spending one unit of the remaining
///distance budget per level. A variant that was already generated has been
///expanded with at least as much remaining budget, so recursion stops there.
fn collect_deletes(word: &[char], remaining: usize, variants: &mut HashSet<String>) {
    if remaining == 0 || word.is_empty() {
        return;
    }
    for i in 0..word.len() {
        let mut deleted: Vec<char> = Vec::with_capacity(word.len() - 1);
        deleted.extend_from_slice(&word[..i]);
        deleted.extend_from_slice(&word[i + 1..]);
        let variant: String = deleted.iter().collect();
        if variants.insert(variant) {
            collect_deletes(&deleted, remaining - 1, variants);
        }
    }
}

use rand::Rng;

const ID_PREFIX: &str = "id_";
const ID_SUFFIX_LEN: usize = 7;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fresh client-side comment id such as `id_k3j9x0a`.
pub fn generate_comment_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{ID_PREFIX}{suffix}")
}

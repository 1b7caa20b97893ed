// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_selection(words: usize) -> String {
    (0..words)
        .map(|n| format!("word{n}&more"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[allow(dead_code)]
pub fn generate_url(segments: usize) -> String {
    let path = (0..segments)
        .map(|n| format!("segment-{n}"))
        .collect::<Vec<_>>()
        .join("/");
    format!("https://example.com/{path}:~:text=stale#old-anchor")
}

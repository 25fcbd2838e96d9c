/// Banner placed at the top of every generated source file.
pub const GENERATED_BANNER: &str = "/* !!! This is code generated by Prisma. Do not edit directly. !!! */
/* eslint-disable */
// biome-ignore-all lint: generated file";

pub const TS_NO_CHECK: &str = "// @ts-nocheck";

pub fn preamble(ts_no_check: bool) -> String {
    if ts_no_check {
        format!("{}\n{}\n", GENERATED_BANNER, TS_NO_CHECK)
    } else {
        format!("{}\n", GENERATED_BANNER)
    }
}

/// Whether a file map entry is TypeScript source that receives the banner.
pub fn is_source_file(path: &str) -> bool {
    [".ts", ".mts", ".cts"].iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_with_and_without_ts_nocheck() {
        let plain = preamble(false);
        assert!(plain.starts_with("/* !!! This is code generated by Prisma."));
        assert!(!plain.contains("@ts-nocheck"));
        assert!(preamble(true).ends_with("// @ts-nocheck\n"));
    }

    #[test]
    fn test_source_file_detection() {
        assert!(is_source_file("models/User.ts"));
        assert!(is_source_file("client.mts"));
        assert!(!is_source_file("query_compiler_bg.wasm"));
    }
}

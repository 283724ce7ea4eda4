//! Property-based tests for scratch files

use proptest::prelude::*;
use scratch_fixtures::ScratchDir;

fn line_strategy() -> impl Strategy<Value = String> {
    // Lines never contain the terminator itself
    "[^\n\r]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn scratch_file_reads_back_supplied_lines(lines in prop::collection::vec(line_strategy(), 0..8)) {
        let scratch = ScratchDir::new().unwrap();

        let path = scratch.scratch_file("prop/file.txt", &lines).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let expected: String = lines.iter().map(|line| format!("{line}\n")).collect();
        prop_assert_eq!(&content, &expected);
        let read_back: Vec<&str> = content.lines().collect();
        prop_assert_eq!(read_back.len(), lines.len());
    }

    #[test]
    fn scratch_dir_is_idempotent(segments in prop::collection::vec("[a-z]{1,8}", 1..4)) {
        let scratch = ScratchDir::new().unwrap();
        let relative = segments.join("/");

        let first = scratch.scratch_dir(&relative).unwrap();
        let second = scratch.scratch_dir(&relative).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert!(second.is_dir());
    }
}

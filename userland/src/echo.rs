//! `echo`: print the arguments separated by single spaces.

use minirt_lib::ByteSink;

/// A leading `-n` suppresses the trailing newline. Always succeeds.
pub fn run<O: ByteSink>(args: &[&[u8]], out: &mut O) -> i32 {
    let (newline, words) = match args.split_first() {
        Some((&b"-n", rest)) => (false, rest),
        _ => (true, args),
    };
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            out.put(b" ");
        }
        out.put(word);
    }
    if newline {
        out.put(b"\n");
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Capture(Vec<u8>);

    impl ByteSink for Capture {
        fn put(&mut self, bytes: &[u8]) {
            self.0.extend_from_slice(bytes);
        }
    }

    fn echo(args: &[&[u8]]) -> Vec<u8> {
        let mut out = Capture::default();
        assert_eq!(run(args, &mut out), 0);
        out.0
    }

    #[test]
    fn joins_with_single_spaces() {
        assert_eq!(echo(&[b"hello", b"big", b"world"]), b"hello big world\n");
    }

    #[test]
    fn no_arguments_prints_newline() {
        assert_eq!(echo(&[]), b"\n");
    }

    #[test]
    fn leading_n_suppresses_newline() {
        assert_eq!(echo(&[b"-n", b"a", b"b"]), b"a b");
        assert_eq!(echo(&[b"-n"]), b"");
    }

    #[test]
    fn later_n_is_a_word() {
        assert_eq!(echo(&[b"a", b"-n"]), b"a -n\n");
    }
}

use std::fmt::{self, Display};

use crate::append::{AppendResult, AppendTo, Appendable, FastSink};
use crate::AppendError;

const NULL: &str = "null";

/// Which append strategy an [`AppendableLike`] uses for its sink.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// `String`, appended to natively.
    String,
    /// `Vec<u8>` holding UTF-8, appended to natively.
    Bytes,
    /// Anything else; values are converted to text and passed to
    /// [`Appendable::append_str`].
    Other,
}

impl SinkKind {
    pub fn of(buff: &mut dyn Appendable) -> Self {
        match buff.fast_sink() {
            Some(FastSink::String(_)) => Self::String,
            Some(FastSink::Bytes(_)) => Self::Bytes,
            None => Self::Other,
        }
    }

    pub fn is_fast(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Every kind of value [`AppendableLike::append`] accepts.
#[derive(Copy, Clone)]
pub enum Value<'v> {
    /// Rendered by the value itself; `None` appends `null`.
    Serializable(Option<&'v dyn AppendTo>),
    Sequence(&'v str),
    /// The range is accepted but not applied: the whole sequence is appended.
    SequenceRange(&'v str, usize, usize),
    Char(char),
    Bool(bool),
    Chars(&'v [char]),
    /// `offset` and `len` into the array.
    CharsRange(&'v [char], usize, usize),
    F64(f64),
    F32(f32),
    I32(i32),
    I64(i64),
    Object(&'v dyn Display),
    Str(&'v str),
    Buffer(&'v String),
}

macro_rules! value_from {
    ($($typename:ty => $variant:ident;)*) => {
        $(
            impl From<$typename> for Value<'_> {
                fn from(value: $typename) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}
value_from! {
    bool => Bool;
    char => Char;
    i32 => I32;
    i64 => I64;
    f32 => F32;
    f64 => F64;
}

impl<'v> From<&'v str> for Value<'v> {
    fn from(value: &'v str) -> Self {
        Self::Str(value)
    }
}
impl<'v> From<&'v String> for Value<'v> {
    fn from(value: &'v String) -> Self {
        Self::Buffer(value)
    }
}
impl<'v> From<&'v [char]> for Value<'v> {
    fn from(value: &'v [char]) -> Self {
        Self::Chars(value)
    }
}
impl<'v, const L: usize> From<&'v [char; L]> for Value<'v> {
    fn from(value: &'v [char; L]) -> Self {
        Self::Chars(value)
    }
}
impl<'v> From<&'v dyn Display> for Value<'v> {
    fn from(value: &'v dyn Display) -> Self {
        Self::Object(value)
    }
}
impl<'v> From<&'v dyn AppendTo> for Value<'v> {
    fn from(value: &'v dyn AppendTo) -> Self {
        Self::Serializable(Some(value))
    }
}
impl<'v> From<Option<&'v dyn AppendTo>> for Value<'v> {
    fn from(value: Option<&'v dyn AppendTo>) -> Self {
        Self::Serializable(value)
    }
}

/// Uniform append interface over a borrowed sink.
///
/// The sink is classified once, when the adapter is created. For the fast
/// kinds (`String` and `Vec<u8>`) numbers, booleans and char arrays are
/// written straight into the sink; any other sink receives their text through
/// [`Appendable::append_str`], converted at most once per call.
///
/// The adapter does not own the sink. Read the accumulated content from the
/// sink itself once the adapter is dropped. Writes that happened before a
/// failing call stay in the sink.
pub struct AppendableLike<'a> {
    buff: &'a mut dyn Appendable,
    kind: SinkKind,
}

macro_rules! declare_appends {
    ($($name:ident($($arg:ident: $typename:ty),*) => $variant:ident;)*) => {
        ::paste::paste! {
            $(
                #[inline]
                pub fn [<append_ $name>](&mut self, $($arg: $typename),*) -> AppendResult<&mut Self> {
                    self.append(Value::$variant($($arg),*))
                }
            )*
        }
    };
}

impl<'a> AppendableLike<'a> {
    pub fn new(buff: &'a mut dyn Appendable) -> Self {
        let kind = SinkKind::of(buff);
        tracing::trace!(?kind, "classified append sink");
        Self { buff, kind }
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn into_inner(self) -> &'a mut dyn Appendable {
        self.buff
    }

    pub fn append<'v>(&mut self, value: impl Into<Value<'v>>) -> AppendResult<&mut Self> {
        let value: Value<'v> = value.into();
        match value {
            Value::Serializable(None) => self.buff.append_str(NULL)?,
            Value::Serializable(Some(value)) => value.append_to(self.buff)?,
            Value::Sequence(s) | Value::SequenceRange(s, _, _) => self.buff.append_str(s)?,
            Value::Char(c) => self.buff.append_char(c)?,
            Value::Bool(b) => self.display(&b)?,
            Value::Chars(chars) => self.chars(chars)?,
            Value::CharsRange(chars, offset, len) => {
                let end = offset
                    .checked_add(len)
                    .filter(|end| *end <= chars.len())
                    .ok_or_else(|| AppendError::out_of_bounds(offset, len, chars.len()))?;
                self.chars(&chars[offset..end])?
            }
            Value::F64(d) => self.display(&d)?,
            Value::F32(f) => self.display(&f)?,
            Value::I32(i) => self.display(&i)?,
            Value::I64(l) => self.display(&l)?,
            Value::Object(obj) => self.display(obj)?,
            Value::Str(s) => self.str(s)?,
            Value::Buffer(buffer) => self.str(buffer.as_str())?,
        }
        Ok(self)
    }

    declare_appends! {
        serializable(value: Option<&dyn AppendTo>) => Serializable;
        seq(s: &str) => Sequence;
        seq_range(s: &str, start: usize, end: usize) => SequenceRange;
        char(c: char) => Char;
        bool(b: bool) => Bool;
        chars(chars: &[char]) => Chars;
        chars_range(chars: &[char], offset: usize, len: usize) => CharsRange;
        f64(d: f64) => F64;
        f32(f: f32) => F32;
        i32(i: i32) => I32;
        i64(l: i64) => I64;
        object(obj: &dyn Display) => Object;
        str(s: &str) => Str;
        buffer(buffer: &String) => Buffer;
    }

    fn display(&mut self, value: &dyn Display) -> AppendResult<()> {
        match self.kind {
            SinkKind::String => fmt::Write::write_fmt(self.string_sink()?, format_args!("{value}"))?,
            SinkKind::Bytes => {
                fmt::Write::write_fmt(&mut ByteText(self.bytes_sink()?), format_args!("{value}"))?
            }
            SinkKind::Other => {
                let mut text = String::new();
                fmt::Write::write_fmt(&mut text, format_args!("{value}"))?;
                self.buff.append_str(&text)?
            }
        }
        Ok(())
    }

    fn chars(&mut self, chars: &[char]) -> AppendResult<()> {
        match self.kind {
            SinkKind::String => self.string_sink()?.extend(chars),
            SinkKind::Bytes => {
                let bytes = self.bytes_sink()?;
                for c in chars {
                    bytes.extend_from_slice(c.encode_utf8(&mut [0u8; 4]).as_bytes());
                }
            }
            SinkKind::Other => self.buff.append_str(&String::from_iter(chars))?,
        }
        Ok(())
    }

    fn str(&mut self, s: &str) -> AppendResult<()> {
        match self.kind {
            SinkKind::String => self.string_sink()?.push_str(s),
            SinkKind::Bytes => self.bytes_sink()?.extend_from_slice(s.as_bytes()),
            SinkKind::Other => self.buff.append_str(s)?,
        }
        Ok(())
    }

    fn string_sink(&mut self) -> AppendResult<&mut String> {
        match self.buff.fast_sink() {
            Some(FastSink::String(s)) => Ok(s),
            _ => Err(inconsistent(SinkKind::String)),
        }
    }

    fn bytes_sink(&mut self) -> AppendResult<&mut Vec<u8>> {
        match self.buff.fast_sink() {
            Some(FastSink::Bytes(bytes)) => Ok(bytes),
            _ => Err(inconsistent(SinkKind::Bytes)),
        }
    }
}

/// Formats straight into a byte buffer, leaving `fmt::Error` for the caller.
struct ByteText<'b>(&'b mut Vec<u8>);
impl fmt::Write for ByteText<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn inconsistent(expected: SinkKind) -> AppendError {
    tracing::error!(?expected, "append sink no longer matches its classified kind");
    AppendError::inconsistent(expected)
}

impl Appendable for AppendableLike<'_> {
    fn append_str(&mut self, s: &str) -> AppendResult<()> {
        self.buff.append_str(s)
    }

    fn append_char(&mut self, c: char) -> AppendResult<()> {
        self.buff.append_char(c)
    }

    fn fast_sink(&mut self) -> Option<FastSink<'_>> {
        self.buff.fast_sink()
    }
}

impl fmt::Debug for AppendableLike<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppendableLike")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rand::Rng;
    use tracing_subscriber::EnvFilter;

    use super::*;
    use crate::AppendErrorKind;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A sink with no fast view that counts calls to its primitive.
    #[derive(Default)]
    struct Generic {
        out: String,
        calls: usize,
    }
    impl Appendable for Generic {
        fn append_str(&mut self, s: &str) -> AppendResult<()> {
            self.calls += 1;
            self.out.push_str(s);
            Ok(())
        }
    }

    /// Accepts `budget` writes, then fails every write after.
    struct Failing {
        out: String,
        budget: usize,
    }
    impl Appendable for Failing {
        fn append_str(&mut self, s: &str) -> AppendResult<()> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed").into());
            }
            self.budget -= 1;
            self.out.push_str(s);
            Ok(())
        }
    }

    /// Claims to be a `String` once, then stops exposing its fast view.
    #[derive(Default)]
    struct Fickle {
        out: String,
        asked: bool,
    }
    impl Appendable for Fickle {
        fn append_str(&mut self, s: &str) -> AppendResult<()> {
            self.out.push_str(s);
            Ok(())
        }

        fn fast_sink(&mut self) -> Option<FastSink<'_>> {
            if self.asked {
                return None;
            }
            self.asked = true;
            Some(FastSink::String(&mut self.out))
        }
    }

    struct Point(i32, i32);
    impl Display for Point {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {})", self.0, self.1)
        }
    }

    struct Tagged(&'static str);
    impl AppendTo for Tagged {
        fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
            buff.append_char('<')?;
            buff.append_str(self.0)?;
            buff.append_char('>')
        }
    }

    /// Runs `f` against a `String`, a `Vec<u8>` and a generic sink and
    /// returns the three results.
    fn render_all<F>(f: F) -> [String; 3]
    where
        F: Fn(&mut AppendableLike<'_>) -> AppendResult<()>,
    {
        let mut string = String::new();
        f(&mut AppendableLike::new(&mut string)).expect("Could not append to String");

        let mut bytes = Vec::new();
        f(&mut AppendableLike::new(&mut bytes)).expect("Could not append to Vec");
        let bytes = String::from_utf8(bytes).expect("Expected UTF-8 output");

        let mut generic = Generic::default();
        f(&mut AppendableLike::new(&mut generic)).expect("Could not append to generic sink");

        [string, bytes, generic.out]
    }

    fn assert_all_eq(results: [String; 3], expected: &str) {
        for (result, kind) in results.iter().zip(["String", "Vec<u8>", "generic"]) {
            assert_eq!(result, expected, "{} sink", kind);
        }
    }

    #[test]
    fn classifies_sinks() {
        init_tracing();
        let mut string = String::new();
        assert_eq!(AppendableLike::new(&mut string).kind(), SinkKind::String);
        let mut bytes = Vec::new();
        assert_eq!(AppendableLike::new(&mut bytes).kind(), SinkKind::Bytes);
        let mut generic = Generic::default();
        assert_eq!(AppendableLike::new(&mut generic).kind(), SinkKind::Other);
        assert!(SinkKind::String.is_fast());
        assert!(!SinkKind::Other.is_fast());
    }

    #[test]
    fn nested_adapter_keeps_kind() {
        let mut string = String::new();
        let mut outer = AppendableLike::new(&mut string);
        let inner = AppendableLike::new(&mut outer);
        assert_eq!(inner.kind(), SinkKind::String);
    }

    #[test]
    fn string_sink_scenario() {
        let mut buf = String::new();
        AppendableLike::new(&mut buf)
            .append(42i32)
            .and_then(|like| like.append("x"))
            .and_then(|like| like.append(true))
            .expect("Could not append");
        assert_eq!(buf, "42xtrue");
    }

    #[test]
    fn generic_sink_scenario() {
        let mut sink = Generic::default();
        AppendableLike::new(&mut sink)
            .append_f32(3.5)
            .and_then(|like| like.append_char('!'))
            .expect("Could not append");
        assert_eq!(sink.out, "3.5!");
    }

    #[test]
    fn absent_serializable_is_null() {
        assert_all_eq(render_all(|like| like.append_serializable(None).map(drop)), "null");
        let absent: Option<&dyn AppendTo> = None;
        assert_all_eq(render_all(|like| like.append(absent).map(drop)), "null");
    }

    #[test]
    fn serializable_renders_itself() {
        let tagged = Tagged("b");
        assert_all_eq(
            render_all(|like| like.append(&tagged as &dyn AppendTo).map(drop)),
            "<b>",
        );
    }

    #[test]
    fn sequence_range_appends_whole_sequence() {
        assert_all_eq(
            render_all(|like| like.append_seq_range("hello", 1, 3).map(drop)),
            "hello",
        );
        // Not even checked against the length.
        assert_all_eq(
            render_all(|like| like.append_seq_range("ab", 7, 2).map(drop)),
            "ab",
        );
    }

    #[test]
    fn primitives_render_identically() {
        assert_all_eq(render_all(|like| like.append(true).map(drop)), "true");
        assert_all_eq(render_all(|like| like.append(false).map(drop)), "false");
        assert_all_eq(render_all(|like| like.append('é').map(drop)), "é");
        assert_all_eq(render_all(|like| like.append(-17i32).map(drop)), "-17");
        assert_all_eq(render_all(|like| like.append(i64::MIN).map(drop)), "-9223372036854775808");
        assert_all_eq(render_all(|like| like.append(0.1f64).map(drop)), "0.1");
        assert_all_eq(render_all(|like| like.append(1.0f64).map(drop)), "1");
        assert_all_eq(render_all(|like| like.append(f64::NAN).map(drop)), "NaN");
        assert_all_eq(render_all(|like| like.append(f32::NEG_INFINITY).map(drop)), "-inf");
        assert_all_eq(render_all(|like| like.append(0.3f32).map(drop)), "0.3");
    }

    #[test]
    fn random_numbers_render_identically() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let i: i32 = rng.gen();
            let l: i64 = rng.gen();
            let d: f64 = rng.gen_range(-1.0e9..1.0e9);
            let f: f32 = rng.gen();
            assert_all_eq(render_all(|like| like.append(i).map(drop)), &i.to_string());
            assert_all_eq(render_all(|like| like.append(l).map(drop)), &l.to_string());
            assert_all_eq(render_all(|like| like.append(d).map(drop)), &d.to_string());
            assert_all_eq(render_all(|like| like.append(f).map(drop)), &f.to_string());
        }
    }

    #[test]
    fn strings_and_buffers() {
        let owned = String::from("grüße");
        assert_all_eq(render_all(|like| like.append("plain").map(drop)), "plain");
        assert_all_eq(render_all(|like| like.append(&owned).map(drop)), "grüße");
        assert_all_eq(render_all(|like| like.append_seq("seq").map(drop)), "seq");
    }

    #[test]
    fn char_arrays() {
        let chars = ['a', 'ß', '中', '!'];
        assert_all_eq(render_all(|like| like.append(&chars).map(drop)), "aß中!");
        assert_all_eq(
            render_all(|like| like.append_chars_range(&chars, 1, 2).map(drop)),
            "ß中",
        );
        assert_all_eq(
            render_all(|like| like.append_chars_range(&chars, 4, 0).map(drop)),
            "",
        );
    }

    #[test]
    fn char_range_out_of_bounds_writes_nothing() {
        let chars = ['a', 'b'];
        let mut buf = String::from("pre");
        let err = AppendableLike::new(&mut buf)
            .append_chars_range(&chars, 1, 2)
            .expect_err("Expected out of bounds");
        assert_eq!(err.kind(), AppendErrorKind::OutOfBounds);
        assert_eq!(buf, "pre");

        let mut sink = Generic::default();
        let err = AppendableLike::new(&mut sink)
            .append_chars_range(&chars, usize::MAX, 2)
            .expect_err("Expected out of bounds");
        assert_eq!(err.kind(), AppendErrorKind::OutOfBounds);
        assert_eq!(sink.calls, 0);
    }

    #[test]
    fn objects_use_their_display() {
        let point = Point(3, -4);
        assert_all_eq(render_all(|like| like.append_object(&point).map(drop)), "(3, -4)");
        assert_all_eq(
            render_all(|like| like.append(&point as &dyn Display).map(drop)),
            "(3, -4)",
        );
    }

    #[test]
    fn failing_display_errors_on_every_kind() {
        struct Broken;
        impl Display for Broken {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let mut string = String::from("a");
        let mut bytes = b"a".to_vec();
        let mut generic = Generic {
            out: String::from("a"),
            calls: 0,
        };
        let errors = [
            AppendableLike::new(&mut string).append_object(&Broken).map(drop),
            AppendableLike::new(&mut bytes).append_object(&Broken).map(drop),
            AppendableLike::new(&mut generic).append_object(&Broken).map(drop),
        ];
        for error in errors {
            let error = error.expect_err("Expected the formatting error to propagate");
            assert_eq!(error.kind(), AppendErrorKind::Io);
            assert_eq!(
                error.io_error().map(io::Error::kind),
                Some(io::ErrorKind::Other)
            );
        }
        assert_eq!(string, "a");
        assert_eq!(bytes.as_slice(), b"a");
        assert_eq!(generic.out, "a");
        assert_eq!(generic.calls, 0);
    }

    #[test]
    fn chaining_concatenates_in_order() {
        let point = Point(1, 2);
        let results = render_all(|like| {
            like.append(1i64)?
                .append(',')?
                .append_seq("a")?
                .append_bool(false)?
                .append_object(&point)?
                .append_chars(&['z'])?
                .append_serializable(None)?;
            Ok(())
        });
        assert_all_eq(results, "1,afalse(1, 2)znull");
    }

    #[test]
    fn generic_path_converts_once_per_call() {
        let mut sink = Generic::default();
        AppendableLike::new(&mut sink)
            .append(123456i64)
            .and_then(|like| like.append(&['x', 'y', 'z']))
            .and_then(|like| like.append_chars_range(&['x', 'y', 'z'], 0, 1))
            .and_then(|like| like.append(2.5f64))
            .expect("Could not append");
        assert_eq!(sink.calls, 4);
        assert_eq!(sink.out, "123456xyzx2.5");
    }

    #[test]
    fn io_failure_propagates_without_duplicating() {
        let mut sink = Failing {
            out: String::new(),
            budget: 2,
        };
        let mut like = AppendableLike::new(&mut sink);
        like.append(1i32)
            .and_then(|like| like.append("two"))
            .expect("First two writes should succeed");
        let err = like.append(3i32).expect_err("Expected the third write to fail");
        assert_eq!(err.kind(), AppendErrorKind::Io);
        assert_eq!(
            err.into_io_error().map(|e| e.kind()),
            Some(io::ErrorKind::BrokenPipe)
        );
        assert_eq!(sink.out, "1two");
    }

    #[test]
    fn serializable_failure_propagates() {
        let mut sink = Failing {
            out: String::new(),
            budget: 1,
        };
        let err = AppendableLike::new(&mut sink)
            .append(&Tagged("x") as &dyn AppendTo)
            .expect_err("Expected render to fail");
        assert_eq!(err.kind(), AppendErrorKind::Io);
        // Partial output stays.
        assert_eq!(sink.out, "<");
    }

    #[test]
    fn inconsistent_sink_fails_fast() {
        init_tracing();
        let mut sink = Fickle::default();
        let mut like = AppendableLike::new(&mut sink);
        assert_eq!(like.kind(), SinkKind::String);
        let err = like.append(5i32).expect_err("Expected consistency failure");
        assert_eq!(err.kind(), AppendErrorKind::Inconsistent);
        assert!(err.io_error().is_none());
        // The generic primitive is still usable.
        like.append_char('k').expect("Could not append char");
        assert_eq!(sink.out, "k");
    }

    #[test]
    fn adapter_is_appendable() {
        let mut buf = String::new();
        let mut like = AppendableLike::new(&mut buf);
        Appendable::append_str(&mut like, "raw").expect("Could not append");
        like.append_value(&Tagged("v")).expect("Could not append");
        assert_eq!(format!("{:?}", like), "AppendableLike { kind: String, .. }");
        like.into_inner().append_char('!').expect("Could not append");
        assert_eq!(buf, "raw<v>!");
    }
}

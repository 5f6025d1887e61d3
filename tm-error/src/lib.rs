//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

#[cfg(test)]
extern crate self as tm_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// Implementations are usually generated with `#[derive(ErrorKind)]` from the `tm-attrs` crate.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error as [`Any`], so that the concrete kind can be recovered with
    /// [`Any::downcast_ref`].
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error, optionally associated with regions of source code that can be highlighted.
///
/// Errors that do not originate from source text (such as failing to construct a value) have no
/// spans.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not associated with any source code.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the concrete error kind, if it is of type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the error kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source text.
    pub fn report_to_string(&self, src_id: &str, src: &str) -> String {
        let mut buf = Vec::new();
        match self.build_report(src_id).write((src_id, Source::from(src)), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.kind.message(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tm_attrs::ErrorKind;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown name `{}`", name),
        labels = ["this name"],
        help = "check the spelling",
    )]
    struct UnknownName {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "nothing to see here")]
    struct Unit;

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![0..3], UnknownName { name: "foo".to_string() });
        assert_eq!(err.to_string(), "unknown name `foo`");
    }

    #[test]
    fn downcast() {
        let err = Error::unspanned(Unit);
        assert!(err.is::<Unit>());
        assert_eq!(err.downcast_ref::<UnknownName>(), None);
        assert_eq!(err.downcast_ref::<Unit>(), Some(&Unit));
    }

    #[test]
    fn report_without_spans() {
        let err = Error::unspanned(UnknownName { name: "bar".to_string() });
        let report = err.report_to_string("input", "");
        assert!(report.contains("unknown name `bar`"));
    }

    #[test]
    fn report_with_spans() {
        let err = Error::new(vec![4..7], UnknownName { name: "baz".to_string() });
        let report = err.report_to_string("input", "foo(baz)");
        assert!(report.contains("check the spelling"));
    }
}

mod expression_evaluation_failed;
mod incomplete_mapping;
mod invalid_expression;
mod owner_resolution;
mod unknown_node;
mod unsupported_operation;

use expression_evaluation_failed::ExpressionEvaluationFailed;
use incomplete_mapping::IncompleteMapping;
use invalid_expression::InvalidExpression;
use owner_resolution::OwnerResolution;
use std::sync::Arc;
use unknown_node::UnknownNode;
use unsupported_operation::UnsupportedOperation;

/// An error raised while lowering an expression tree.
///
/// Every error kind produced by this crate describes a broken contract inside
/// the translation pipeline rather than a recoverable user mistake. Callers
/// at the top of the pipeline are expected to surface them as "this query
/// cannot be translated".
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: Arc<ErrorKind>,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root
    /// cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    /// Places `self` beneath the last link of `consequent`'s chain. The
    /// links of `consequent` are rebuilt, so clones of it keep their own
    /// chain.
    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let (kind, cause) = match consequent.inner {
            Some(inner) => (inner.kind.clone(), inner.cause.clone()),
            None => (Arc::new(ErrorKind::Unknown), None),
        };

        let cause = match cause {
            Some(cause) => self.context_impl(cause),
            None => self,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(cause),
            })),
        }
    }

    /// Builds an ad-hoc error from format arguments. Used by `bail!` and
    /// `err!`.
    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(anyhow::anyhow!("{args}")))
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &*inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Adhoc(err) => Some(err.as_ref()),
            _ => self
                .inner
                .as_ref()
                .and_then(|inner| inner.cause.as_ref())
                .map(|cause| cause as &(dyn std::error::Error + 'static)),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(anyhow::Error),
    ExpressionEvaluationFailed(ExpressionEvaluationFailed),
    IncompleteMapping(IncompleteMapping),
    InvalidExpression(InvalidExpression),
    OwnerResolution(OwnerResolution),
    UnknownNode(UnknownNode),
    UnsupportedOperation(UnsupportedOperation),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            ExpressionEvaluationFailed(err) => core::fmt::Display::fmt(err, f),
            IncompleteMapping(err) => core::fmt::Display::fmt(err, f),
            InvalidExpression(err) => core::fmt::Display::fmt(err, f),
            OwnerResolution(err) => core::fmt::Display::fmt(err, f),
            UnknownNode(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown tern error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner {
                kind: Arc::new(kind),
                cause: None,
            })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Adhoc(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(anyhow::anyhow!("{self}")))
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(anyhow::anyhow!(self)))
    }
}

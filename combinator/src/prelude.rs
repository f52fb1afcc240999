use std::rc::Rc;

pub type Identifier = Rc<String>;

/// Character offsets into the parsed input.
pub type Span = std::ops::Range<usize>;

#[derive(derive_more::AsRef, Clone, derive_more::Display, Debug)]
#[display(bound = "T: std::fmt::Display")]
#[display(fmt = "{value}")]
pub struct Spanned<T> {
    pub span: Span,
    #[as_ref]
    pub value: T,
}
impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { span, value }
    }
    pub fn forget_span(self) -> T {
        self.value
    }
    pub fn value(&self) -> &T {
        &self.value
    }
    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

pub use chumsky::error::Error as _;
pub type Error<I = String> = chumsky::error::Simple<I, Span>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One-line description of a parse error, for places where no source report is printed.
pub fn describe(e: &Error) -> String {
    use chumsky::error::SimpleReason;
    let found = e.found().map(String::as_str).unwrap_or("end of the input");
    match e.reason() {
        SimpleReason::Unexpected => {
            let expected = e
                .expected()
                .map(|t| t.as_ref().map(String::as_str).unwrap_or("end of the input"))
                .collect::<Vec<_>>()
                .join(", ");
            if expected.is_empty() {
                format!("unexpected {found} at {:?}", e.span())
            } else {
                format!("unexpected {found} at {:?}, expected {expected}", e.span())
            }
        }
        SimpleReason::Unclosed { delimiter, .. } => {
            format!("unclosed delimiter {delimiter}, found {found}")
        }
        SimpleReason::Custom(msg) => msg.clone(),
    }
}

use rust_decimal::Decimal;

/// A horizontal extent `[start_x, end_x]`.
///
/// Rafter queries only care about the x-extent of a panel or row, so a span
/// stands in for the zero-height rectangle those queries operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start_x: Decimal,
    end_x: Decimal,
}

impl Span {
    /// Creates a span, swapping the bounds if they are given in reverse.
    #[must_use]
    pub fn new(start_x: Decimal, end_x: Decimal) -> Self {
        if start_x <= end_x {
            Self { start_x, end_x }
        } else {
            Self {
                start_x: end_x,
                end_x: start_x,
            }
        }
    }

    /// Returns the smallest span covering every input span, or `None` when empty.
    #[must_use]
    pub fn enclosing<I: IntoIterator<Item = Span>>(spans: I) -> Option<Self> {
        spans.into_iter().reduce(|acc, span| Self {
            start_x: acc.start_x.min(span.start_x),
            end_x: acc.end_x.max(span.end_x),
        })
    }

    #[must_use]
    pub fn start_x(&self) -> Decimal {
        self.start_x
    }

    #[must_use]
    pub fn end_x(&self) -> Decimal {
        self.end_x
    }

    #[must_use]
    pub fn width(&self) -> Decimal {
        self.end_x - self.start_x
    }

    /// Returns the exact geometric midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Decimal {
        self.start_x + self.width() / Decimal::TWO
    }

    /// Shrinks both ends by `margin`. Returns `None` if nothing is left.
    #[must_use]
    pub fn inset(&self, margin: Decimal) -> Option<Self> {
        let start_x = self.start_x + margin;
        let end_x = self.end_x - margin;
        (start_x <= end_x).then_some(Self { start_x, end_x })
    }
}

/// How a [BSpline](crate::BSpline) is evaluated outside its knots, i.e. for `x < knots[0]` or
/// `x >= knots[last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extrapolation {
    /// Value is 0 outside the knots.
    Zero,
    /// Value of the first/last control point outside the knots.
    #[default]
    Constant,
    /// Straight line through the first two/last two control points.
    Linear,
}

impl Extrapolation {
    /// Extrapolation to use for the derivative of a spline extrapolated with `self`.
    /// Flat extrapolation has zero slope, a straight line has a constant one.
    pub fn derivative(self) -> Self {
        match self {
            Extrapolation::Zero | Extrapolation::Constant => Extrapolation::Zero,
            Extrapolation::Linear => Extrapolation::Constant,
        }
    }
}

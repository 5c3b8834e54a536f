use float_cmp::approx_eq;

pub trait Almost {
    fn almost(&self, other: &Self) -> bool;
}

impl Almost for f64 {
    fn almost(&self, other: &f64) -> bool {
        approx_eq!(f64, *self, *other, ulps = 5)
    }
}

impl<T> Almost for Option<T>
where
    T: Almost,
{
    fn almost(&self, other: &Option<T>) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.almost(b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_almost_option_both_some() {
        assert!(Some(0.3).almost(&Some(0.3)));
    }

    #[test]
    fn test_almost_option_lhs_none() {
        assert!(!None.almost(&Some(0.3)));
    }

    #[test]
    fn test_almost_option_both_none() {
        assert!(None::<f64>.almost(&None::<f64>));
    }
}

mod tests {
    use approx::assert_relative_eq;

    use crate::time::{Time, NS_PER_S, NS_PER_US, PS_PER_NS};

    #[test]
    fn test_time_conversions() {
        let one_ns = Time::from_ns(1.0);
        assert_relative_eq!(one_ns.to_ps(), PS_PER_NS);
        assert_relative_eq!(one_ns.to_us(), 1.0 / NS_PER_US);
        assert_relative_eq!(one_ns.to_s(), 1.0 / NS_PER_S);

        let window = Time::from_us(10.0);
        assert_relative_eq!(window.to_ns(), 10_000.0);

        let step = Time::from_ps(10.0);
        assert_relative_eq!(step.to_ns(), 0.01);
    }

    #[test]
    fn test_time_arithmetic() {
        let a = Time::from_ns(10.0);
        let b = Time::from_ns(4.0);

        assert_relative_eq!((a + b).to_ns(), 14.0);
        assert_relative_eq!((a - b).to_ns(), 6.0);
        assert_relative_eq!((a * 0.5).to_ns(), 5.0);
        assert_relative_eq!((0.5 * a).to_ns(), 5.0);
        assert_relative_eq!((a / 4.0).to_ns(), 2.5);
        assert_relative_eq!(a / b, 2.5);
        assert!(b < a);
    }
}

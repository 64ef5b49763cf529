mod tests {
    use approx::assert_relative_eq;

    use crate::length::{Length, MM_PER_CM, UM_PER_CM};

    #[test]
    fn test_length_conversions() {
        let one_cm = Length::from_cm(1.0);
        assert_relative_eq!(one_cm.to_mm(), MM_PER_CM);
        assert_relative_eq!(one_cm.to_um(), UM_PER_CM);
        assert_relative_eq!(one_cm.to_m(), 0.01);

        // Strip pitch from the silicon setup
        let pitch = Length::from_um(55.0);
        assert_relative_eq!(pitch.to_cm(), 55.0e-4);

        let round_trip = Length::from_mm(Length::from_cm(4.32).to_mm()).to_cm();
        assert_relative_eq!(round_trip, 4.32);
    }

    #[test]
    fn test_length_arithmetic_operations() {
        let a = Length::from_cm(5.0);
        let b = Length::from_cm(3.0);

        assert_relative_eq!((a + b).to_cm(), 8.0);
        assert_relative_eq!((a - b).to_cm(), 2.0);
        assert_relative_eq!((b - a).abs().to_cm(), 2.0);
        assert_relative_eq!((-a).to_cm(), -5.0);
        assert_relative_eq!((a * 2.0).to_cm(), 10.0);
        assert_relative_eq!((2.0 * a).to_cm(), 10.0);
        assert_relative_eq!((a / 2.0).to_cm(), 2.5);
        assert_relative_eq!(a / b, 5.0 / 3.0);
    }

    #[test]
    fn test_length_min_max() {
        let a = Length::from_cm(1.0);
        let b = Length::from_mm(20.0);

        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
        assert!(a < b);
    }
}

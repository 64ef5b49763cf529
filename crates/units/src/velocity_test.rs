mod tests {
    use approx::assert_relative_eq;

    use crate::velocity::{Velocity, SPEED_OF_LIGHT_CM_PER_NS};
    use crate::{Length, Time};

    #[test]
    fn test_velocity_conversions() {
        // 1 cm/ns is 1000 cm/µs, the factor applied before filling speed histograms
        let v = Velocity::from_cm_per_ns(1.0);
        assert_relative_eq!(v.to_cm_per_us(), 1000.0);
        assert_relative_eq!(v.to_mm_per_ns(), 10.0);
        assert_relative_eq!(v.to_um_per_ns(), 1e4);

        let argon = Velocity::from_cm_per_us(3.5);
        assert_relative_eq!(argon.to_cm_per_ns(), 0.0035);

        assert_relative_eq!(Velocity::from_mm_per_ns(1.0).to_cm_per_ns(), 0.1);
        assert_relative_eq!(Velocity::from_um_per_ns(100.0).to_cm_per_ns(), 0.01);
    }

    #[test]
    fn test_velocity_from_distance_time() {
        let v = Velocity::from_distance_time(Length::from_cm(0.5), Time::from_ns(1.0))
            .expect("positive elapsed time");
        assert_relative_eq!(v.to_cm_per_ns(), 0.5);

        assert!(Velocity::from_distance_time(Length::from_cm(0.5), Time::zero()).is_none());
        assert!(Velocity::from_distance_time(Length::from_cm(0.5), Time::from_ns(-1.0)).is_none());
    }

    #[test]
    fn test_velocity_time_product() {
        let v = Velocity::from_cm_per_us(5.0);
        let drift_time = v.time_to_cover(Length::from_cm(1.0));
        assert_relative_eq!(drift_time.to_ns(), 200.0);

        let covered = v * Time::from_ns(100.0);
        assert_relative_eq!(covered.to_cm(), 0.5);
    }

    #[test]
    fn test_velocity_operations() {
        let a = Velocity::from_cm_per_ns(1.0);
        let b = Velocity::from_cm_per_ns(2.0);

        assert_relative_eq!((a + b).to_cm_per_ns(), 3.0);
        assert_relative_eq!((b - a).to_cm_per_ns(), 1.0);
        assert_relative_eq!((a * 3.0).to_cm_per_ns(), 3.0);
        assert_relative_eq!((b / 2.0).to_cm_per_ns(), 1.0);
        assert_relative_eq!(b / a, 2.0);
        assert!(Velocity::from_cm_per_ns(SPEED_OF_LIGHT_CM_PER_NS) > b);
    }
}

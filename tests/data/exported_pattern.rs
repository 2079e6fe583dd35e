HapticPattern::new(
    vec![
        HapticEvent::new(0.5, 0.5, 0.0, EventType::Continuous { duration: 0.15 }),
        HapticEvent::new(0.6, 0.4, 0.2, EventType::Continuous { duration: 0.45 }),
        HapticEvent::new(0.4, 0.2, 0.7, EventType::Transient),
    ],
    vec![
        HapticCurve::from_array(
            ParameterId::Intensity,
            [
                ControlPoint::new(0.0, 0.5),
                ControlPoint::new(0.2, 0.0),
                ControlPoint::new(0.25, 0.25),
                ControlPoint::new(0.35, 0.4),
                ControlPoint::new(0.45, 0.25),
                ControlPoint::new(0.65, 0.0),
            ],
            0.0,
        ),
        HapticCurve::from_array(
            ParameterId::AttackTime,
            [
                ControlPoint::new(0.0, 1.0),
                ControlPoint::new(1.5, 0.25),
            ],
            0.1,
        ),
    ],
)

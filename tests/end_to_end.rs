use dev_helpers::{raw_tone, TextDisplay};
use micro_tuner::common::Q15;
use micro_tuner::{
    Analysis, Classification, FrameConsumer, NoTicks, SampleProducer, SpectrumView, Tuner,
    TunerConfig, VIOLIN_STRINGS,
};

const SAMPLE_RATE: f32 = 36608.0;
const FRAME_LEN: usize = 256;

fn setup() -> (Tuner, SampleProducer, FrameConsumer) {
    let tuner = Tuner::new(TunerConfig::default()).unwrap();
    assert_eq!(tuner.config().sample_rate, SAMPLE_RATE);
    assert_eq!(tuner.config().frame_len, FRAME_LEN);
    let (producer, consumer) = tuner.frame_exchange();
    (tuner, producer, consumer)
}

fn analyze_tone(frequency: f32, amplitude: f32) -> Analysis {
    analyze_tone_at_phase(frequency, amplitude, 0.0)
}

fn analyze_tone_at_phase(frequency: f32, amplitude: f32, phase: f32) -> Analysis {
    let (mut tuner, mut producer, mut consumer) = setup();
    for raw in raw_tone(frequency, SAMPLE_RATE, amplitude, phase, FRAME_LEN) {
        producer.push(raw);
    }
    tuner.poll(&mut consumer, &NoTicks).unwrap()
}

const G_STRING: Classification = Classification::Matched {
    index: 0,
    name: "G",
};

#[test]
fn test_g_string() {
    // 196 Hz is 1.37 bins from DC. Bin 2 wins without being a local maximum,
    // so the estimate is held half a bin below it, at 214.5 Hz.
    for step in 0..8 {
        let phase = (step as f32) * 0.4;
        let analysis = analyze_tone_at_phase(196.0, 0.9, phase);
        assert_eq!(analysis.classification, G_STRING, "phase {}", phase);
        assert_eq!(analysis.peak.bin, 2);
        assert!(
            (analysis.frequency() - 196.0).abs() < 20.0,
            "phase {}: {} Hz",
            phase,
            analysis.frequency()
        );
    }
}

#[test]
fn test_low_tones_stay_within_a_bin() {
    let bin_width = SAMPLE_RATE / (FRAME_LEN as f32);
    let mut frequency = 163.0;
    while frequency <= 300.0 {
        for step in 0..8 {
            let phase = (step as f32) * 0.4;
            let analysis = analyze_tone_at_phase(frequency, 0.9, phase);
            assert!(
                (analysis.frequency() - frequency).abs() < bin_width,
                "{} Hz at phase {} estimated as {} Hz",
                frequency,
                phase,
                analysis.frequency()
            );
        }
        frequency += 4.0;
    }
}

#[test]
fn test_g_string_searching_from_bin_1() {
    let config = TunerConfig {
        min_peak_bin: 1,
        ..TunerConfig::default()
    };
    let mut tuner = Tuner::new(config).unwrap();
    let (mut producer, mut consumer) = tuner.frame_exchange();
    let bin_width = config.bin_width();
    for step in 0..8 {
        let phase = (step as f32) * 0.4;
        for raw in raw_tone(196.0, SAMPLE_RATE, 0.9, phase, FRAME_LEN) {
            producer.push(raw);
        }
        let analysis = tuner.poll(&mut consumer, &NoTicks).unwrap();
        assert_eq!(analysis.classification, G_STRING, "phase {}", phase);
        assert!(
            (analysis.frequency() - 196.0).abs() < bin_width / 10.0,
            "phase {}: {} Hz",
            phase,
            analysis.frequency()
        );
    }
}

#[test]
fn test_sine_sweep() {
    let bin_width = SAMPLE_RATE / (FRAME_LEN as f32);
    let mut frequency = 300.0;
    while frequency <= 791.0 {
        let analysis = analyze_tone(frequency, 0.8);
        let error = (analysis.frequency() - frequency).abs();
        assert!(
            error < bin_width / 10.0,
            "{} Hz estimated as {} Hz",
            frequency,
            analysis.frequency()
        );
        frequency += 7.0;
    }
}

#[test]
fn test_every_string_matches() {
    for (index, pitch) in VIOLIN_STRINGS.iter().enumerate() {
        let analysis = analyze_tone(pitch.frequency, 0.9);
        assert_eq!(analysis.label(), pitch.name);
        assert_eq!(
            analysis.classification,
            Classification::Matched {
                index,
                name: pitch.name
            }
        );
    }
}

#[test]
fn test_between_strings_is_unmatched() {
    // Halfway between A and E, outside both 10 % bands.
    let analysis = analyze_tone(540.0, 0.9);
    assert!(!analysis.silent);
    assert_eq!(analysis.classification, Classification::Unmatched);
    assert_eq!(analysis.label(), "--");
}

#[test]
fn test_silence() {
    let (mut tuner, mut producer, mut consumer) = setup();
    for _ in 0..FRAME_LEN {
        producer.push(0x8000);
    }
    let analysis = tuner.poll(&mut consumer, &NoTicks).unwrap();
    assert!(tuner.magnitudes().iter().all(|magnitude| *magnitude == 0));
    assert_eq!(analysis.peak.bin, 2);
    assert_eq!(analysis.peak.offset, 0.0);
    assert!(analysis.silent);
    assert_eq!(analysis.classification, Classification::Unmatched);
    assert_eq!(analysis.label(), "--");
}

#[test]
fn test_back_pressure() {
    let (mut tuner, mut producer, mut consumer) = setup();
    let a_string = raw_tone(440.0, SAMPLE_RATE, 0.9, 0.0, FRAME_LEN);
    for raw in a_string.iter() {
        producer.push(*raw);
    }
    // Nobody consumes the frame while an E string arrives.
    for raw in raw_tone(659.25, SAMPLE_RATE, 0.9, 0.0, 3 * FRAME_LEN) {
        producer.push(raw);
    }
    assert_eq!(producer.stats().dropped_samples, 3 * FRAME_LEN as u32);

    {
        let frame = consumer.try_acquire().unwrap();
        let expected: Vec<Q15> = a_string
            .iter()
            .map(|raw| micro_tuner::common::from_offset_binary(*raw))
            .collect();
        assert_eq!(&*frame, &expected[..]);
    }
    // The guard was dropped without analyzing, so the next frame starts now.
    assert!(tuner.poll(&mut consumer, &NoTicks).is_none());

    for raw in a_string.iter() {
        producer.push(*raw);
    }
    let analysis = tuner.poll(&mut consumer, &NoTicks).unwrap();
    assert_eq!(analysis.label(), "A");
    assert_eq!(tuner.diagnostics().dropped_samples, 3 * FRAME_LEN as u32);
    assert_eq!(tuner.diagnostics().frames_captured, 2);
    assert_eq!(tuner.diagnostics().frames_processed, 1);
}

#[test]
fn test_rendering() {
    let (mut tuner, mut producer, mut consumer) = setup();
    for raw in raw_tone(293.66, SAMPLE_RATE, 0.9, 0.0, FRAME_LEN) {
        producer.push(raw);
    }
    let analysis = tuner.poll(&mut consumer, &NoTicks).unwrap();

    let view = SpectrumView::default();
    let mut display = TextDisplay::new(128, 64);
    view.render(
        &mut display,
        tuner.magnitudes(),
        analysis.display_frequency(),
        analysis.label(),
    );
    assert_eq!(display.flush_count(), 1);
    assert_eq!(
        display.digits(),
        Some(format!("{:>4}", analysis.display_frequency()).as_str())
    );
    assert_eq!(display.text(), Some("D"));

    // The tallest bar is the peak bin, drawn at x = 0 for bin 2.
    let tallest = (0..128).max_by_key(|x| (display.column_height(*x), -(*x as i32)));
    assert_eq!(tallest, Some(0));
    assert!(display.column_height(0) > 24);
    // Nothing is drawn below the bar area.
    assert!((48..64).all(|y| (0..128).all(|x| !display.pixel(x, y))));
    assert!(display.flushed().unwrap().ends_with("  D\n"));
}

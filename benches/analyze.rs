use criterion::*;
use purethermal::{AnalyzerConfig, FrameAnalyzer, RawFrame};

fn gray16_frames(width: usize, height: usize, count: usize) -> Vec<Vec<u16>> {
    (0..count)
        .map(|phase| {
            (0..width * height)
                .map(|i| 27315 + (i as u16).wrapping_mul(7).wrapping_add(phase as u16 * 191) % 1500)
                .collect()
        })
        .collect()
}

fn analyze(c: &mut Criterion) {
    c.bench_function("analyze_gray16_160x120", |b| {
        let frames = gray16_frames(160, 120, 8);
        let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default()).unwrap();
        // first frame allocates; the loop measures the steady state
        analyzer
            .analyze(&RawFrame::gray16(160, 120, &frames[0]))
            .unwrap();
        let mut cursor = 0;
        b.iter(|| {
            cursor = (cursor + 1) % frames.len();
            analyzer
                .analyze(&RawFrame::gray16(160, 120, &frames[cursor]))
                .unwrap();
        })
    });

    c.bench_function("analyze_gray8_160x120", |b| {
        let frames: Vec<Vec<u8>> = (0..8u16)
            .map(|phase| {
                (0..160 * 120)
                    .map(|i| (i as u16).wrapping_mul(13).wrapping_add(phase * 37) as u8)
                    .collect()
            })
            .collect();
        let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::legacy_gray8()).unwrap();
        analyzer
            .analyze(&RawFrame::gray8(160, 120, &frames[0]))
            .unwrap();
        let mut cursor = 0;
        b.iter(|| {
            cursor = (cursor + 1) % frames.len();
            analyzer
                .analyze(&RawFrame::gray8(160, 120, &frames[cursor]))
                .unwrap();
        })
    });
}

criterion_group! {
    name = analysis;
    config = Criterion::default().sample_size(10);
    targets = analyze
}

criterion_main!(analysis);

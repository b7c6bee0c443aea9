//! Pipeline throughput on a long signal

use criterion::{criterion_group, criterion_main, Criterion};
use feature_store::{FeatureError, FeatureSeries, FeatureSource, OnDemandExtractor, Signal};
use frame_grid::{FrameGrid, Segment};
use ndarray::{Array, Array2, ArrayView3};
use sequence_labeler::{LabelerConfig, LabelingError, ScoringModel, SequenceLabeler};

struct BenchSignal {
    duration: f64,
}

impl Signal for BenchSignal {
    fn uri(&self) -> &str {
        "bench/sixty-seconds"
    }

    fn extent(&self) -> Segment {
        Segment::new(0.0, self.duration)
    }
}

struct BenchExtractor;

impl OnDemandExtractor for BenchExtractor {
    fn frame_grid(&self) -> FrameGrid {
        FrameGrid::new(0.0, 0.01, 0.01).unwrap()
    }

    fn extract(&self, signal: &dyn Signal) -> Result<FeatureSeries, FeatureError> {
        let n_frames = (signal.extent().duration() / 0.01).round() as usize;
        let data = Array::from_shape_fn((n_frames, 35), |(i, j)| ((i + j) % 17) as f32);
        Ok(FeatureSeries::new(data, self.frame_grid()))
    }
}

struct BenchModel;

impl ScoringModel for BenchModel {
    fn n_classes(&self) -> Option<usize> {
        Some(2)
    }

    fn score(&self, batch: ArrayView3<'_, f32>) -> Result<Array2<f32>, LabelingError> {
        Ok(Array2::from_elem((batch.shape()[0], 2), 0.5))
    }
}

fn bench_apply(c: &mut Criterion) {
    let config = LabelerConfig {
        duration: 2.0,
        step: Some(0.1),
        batch_size: 32,
        ..LabelerConfig::default()
    };
    let features = FeatureSource::OnDemand(Box::new(BenchExtractor));
    let mut labeler = SequenceLabeler::new(Box::new(BenchModel), features, config).unwrap();
    let signal = BenchSignal { duration: 60.0 };

    // Warm the cache so the measurement covers windowing, scoring, and
    // aggregation rather than the one-off extraction
    labeler.apply(&signal).unwrap();

    c.bench_function("apply_60s_signal", |b| b.iter(|| labeler.apply(&signal).unwrap()));
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);

use crate::interface::{ImuState, IndexRange, Point};
use crate::prelude::{RegistrationResult, SweepOutput};

/// Downstream consumer of the ring-sorted cloud.
pub trait FeatureExtractor {
    type Features;

    fn extract(&mut self, cloud: &[Point], scan_indices: &[IndexRange]) -> Self::Features;
}

/// Sink for extracted features of one sweep.
pub trait Publisher<F> {
    fn publish(
        &mut self,
        features: F,
        sweep_time: f64,
        imu_start: Option<&ImuState>,
    ) -> RegistrationResult<()>;
}

/// Runs feature extraction and then publication for each sweep.
pub struct Handoff<E, P> {
    extractor: E,
    publisher: P,
}

impl<E, P> Handoff<E, P>
where
    E: FeatureExtractor,
    P: Publisher<E::Features>,
{
    pub fn new(extractor: E, publisher: P) -> Self {
        Self {
            extractor,
            publisher,
        }
    }

    pub fn deliver(&mut self, output: &SweepOutput) -> RegistrationResult<()> {
        let features = self.extractor.extract(&output.cloud, &output.scan_indices);
        self.publisher
            .publish(features, output.sweep_time, output.imu_start.as_ref())
    }

    pub fn into_parts(self) -> (E, P) {
        (self.extractor, self.publisher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{RegistrationError, SweepMetadata};

    struct RingSizes;

    impl FeatureExtractor for RingSizes {
        type Features = Vec<usize>;

        fn extract(&mut self, cloud: &[Point], scan_indices: &[IndexRange]) -> Vec<usize> {
            assert_eq!(cloud.len(), scan_indices.iter().map(IndexRange::len).sum());
            scan_indices.iter().map(IndexRange::len).collect()
        }
    }

    #[derive(Default)]
    struct Recorder {
        published: Vec<(Vec<usize>, f64, Option<ImuState>)>,
    }

    impl Publisher<Vec<usize>> for Recorder {
        fn publish(
            &mut self,
            features: Vec<usize>,
            sweep_time: f64,
            imu_start: Option<&ImuState>,
        ) -> RegistrationResult<()> {
            self.published.push((features, sweep_time, imu_start.copied()));
            Ok(())
        }
    }

    struct Refusing;

    impl Publisher<Vec<usize>> for Refusing {
        fn publish(&mut self, _: Vec<usize>, _: f64, _: Option<&ImuState>) -> RegistrationResult<()> {
            Err(RegistrationError::Publish("sink closed".into()))
        }
    }

    fn output(imu_start: Option<ImuState>) -> SweepOutput {
        SweepOutput {
            cloud: vec![Point::new(1.0, 0.0, 0.0); 3],
            scan_indices: vec![IndexRange::new(0, -1), IndexRange::new(0, 2)],
            sweep_time: 12.5,
            imu_start,
            metadata: SweepMetadata::default(),
        }
    }

    #[test]
    fn features_are_published_with_sweep_time() {
        let mut handoff = Handoff::new(RingSizes, Recorder::default());
        handoff.deliver(&output(None)).unwrap();

        let imu = ImuState::new(12.5, 0.0, 0.0, 0.3, [0.0; 3], [0.0; 3]);
        handoff.deliver(&output(Some(imu))).unwrap();

        let (_, recorder) = handoff.into_parts();
        assert_eq!(recorder.published.len(), 2);
        assert_eq!(recorder.published[0], (vec![0, 3], 12.5, None));
        assert_eq!(recorder.published[1].2, Some(imu));
    }

    #[test]
    fn publish_errors_reach_the_caller() {
        let mut handoff = Handoff::new(RingSizes, Refusing);
        assert_eq!(
            handoff.deliver(&output(None)),
            Err(RegistrationError::Publish("sink closed".into()))
        );
    }
}

use crate::form::FormState;
use crate::models::{FeatureCollection, PredictionRequest};

pub const RUN_LABEL: &str = "Run Model";
pub const RUNNING_LABEL: &str = "Running Model...";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Remote coverage model.
#[allow(async_fn_in_trait)]
pub trait PredictionService {
    async fn predict(&self, request: &PredictionRequest) -> Result<FeatureCollection, PredictError>;
}

/// Label and enablement of the button that starts a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerState {
    pub label: &'static str,
    pub disabled: bool,
}

impl TriggerState {
    pub const IDLE: TriggerState = TriggerState {
        label: RUN_LABEL,
        disabled: false,
    };
    pub const RUNNING: TriggerState = TriggerState {
        label: RUNNING_LABEL,
        disabled: true,
    };
}

impl Default for TriggerState {
    fn default() -> Self {
        Self::IDLE
    }
}

pub trait Trigger {
    fn set_state(&mut self, state: TriggerState);
}

/// Holds the trigger in its running state; restores it to idle on drop,
/// whichever way the prediction exits.
pub struct TriggerGuard<T: Trigger> {
    trigger: T,
}

impl<T: Trigger> TriggerGuard<T> {
    pub fn engage(mut trigger: T) -> Self {
        trigger.set_state(TriggerState::RUNNING);
        Self { trigger }
    }
}

impl<T: Trigger> Drop for TriggerGuard<T> {
    fn drop(&mut self) {
        self.trigger.set_state(TriggerState::IDLE);
    }
}

/// One submission: lock the trigger, build the request from `form`, call the
/// service and hand a successful response to `render`.
///
/// Failures are logged and returned; `render` is not called for them, so the
/// map keeps whatever it showed before.
pub async fn run_prediction<P, T, R>(
    service: &P,
    trigger: T,
    form: &FormState,
    render: R,
) -> Result<usize, PredictError>
where
    P: PredictionService,
    T: Trigger,
    R: FnOnce(&FeatureCollection) -> usize,
{
    let _guard = TriggerGuard::engage(trigger);
    let request = form.to_request();
    tracing::debug!(?request, "Submitting prediction request");

    match service.predict(&request).await {
        Ok(collection) => {
            let drawn = render(&collection);
            tracing::info!(
                features = collection.features.len(),
                drawn,
                "Rendered coverage prediction"
            );
            Ok(drawn)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error during prediction");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::models::{Coordinate, CoverageFeature, CoverageProperties, PolygonGeometry};
    use crate::session::testing::{FakeSurface, Op};
    use crate::session::CoverageSession;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<TriggerState>>>);

    impl Trigger for Recorder {
        fn set_state(&mut self, state: TriggerState) {
            self.0.borrow_mut().push(state);
        }
    }

    impl Recorder {
        fn states(&self) -> Vec<TriggerState> {
            self.0.borrow().clone()
        }
    }

    /// Replays a canned result and remembers the last request.
    struct FakeService {
        result: Result<FeatureCollection, PredictError>,
        seen: RefCell<Option<PredictionRequest>>,
    }

    impl FakeService {
        fn new(result: Result<FeatureCollection, PredictError>) -> Self {
            Self {
                result,
                seen: RefCell::new(None),
            }
        }
    }

    impl PredictionService for FakeService {
        async fn predict(
            &self,
            request: &PredictionRequest,
        ) -> Result<FeatureCollection, PredictError> {
            *self.seen.borrow_mut() = Some(request.clone());
            self.result.clone()
        }
    }

    fn collection(rssi: &[f64]) -> FeatureCollection {
        FeatureCollection {
            features: rssi
                .iter()
                .map(|&r| CoverageFeature {
                    geometry: PolygonGeometry {
                        coordinates: vec![vec![[-114.0, 51.0], [-114.1, 51.1], [-114.0, 51.0]]],
                    },
                    properties: CoverageProperties { model_rssi: r },
                })
                .collect(),
        }
    }

    fn form() -> FormState {
        let mut form = FormState::default();
        form.set_coordinate(Coordinate::new(51.05, -114.07));
        form
    }

    #[test]
    fn test_guard_engages_and_releases() {
        let recorder = Recorder::default();
        {
            let _guard = TriggerGuard::engage(recorder.clone());
            assert_eq!(recorder.states(), vec![TriggerState::RUNNING]);
        }
        assert_eq!(
            recorder.states(),
            vec![TriggerState::RUNNING, TriggerState::IDLE]
        );
    }

    #[test]
    fn test_trigger_labels() {
        assert_eq!(TriggerState::default().label, "Run Model");
        assert!(!TriggerState::default().disabled);
        assert_eq!(TriggerState::RUNNING.label, "Running Model...");
        assert!(TriggerState::RUNNING.disabled);
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(PredictError::Status(500).to_string(), "HTTP error! Status: 500");
    }

    #[tokio::test]
    async fn test_success_renders_and_restores_trigger() {
        let service = FakeService::new(Ok(collection(&[-100.0, -135.0])));
        let recorder = Recorder::default();
        let session = RefCell::new(CoverageSession::new(FakeSurface::default()));
        let f = form();

        let drawn = run_prediction(&service, recorder.clone(), &f, |fc| {
            session.borrow_mut().render(fc, f.rssi_threshold())
        })
        .await
        .unwrap();

        assert_eq!(drawn, 1);
        assert!(session.borrow().layer().is_some());
        assert_eq!(
            recorder.states(),
            vec![TriggerState::RUNNING, TriggerState::IDLE]
        );
        let sent = service.seen.borrow().clone().unwrap();
        assert_eq!(sent.lat, 51.05);
        assert_eq!(sent.lon, -114.07);
        assert!(sent.overrides.is_none());
    }

    #[tokio::test]
    async fn test_http_500_leaves_map_untouched_and_restores_trigger() {
        let session = RefCell::new(CoverageSession::new(FakeSurface::default()));
        session
            .borrow_mut()
            .render(&collection(&[-100.0]), -130.0);

        let service = FakeService::new(Err(PredictError::Status(500)));
        let recorder = Recorder::default();
        let f = form();

        let result = run_prediction(&service, recorder.clone(), &f, |fc| {
            session.borrow_mut().render(fc, f.rssi_threshold())
        })
        .await;

        assert_eq!(result, Err(PredictError::Status(500)));
        assert_eq!(session.borrow().surface().ops, vec![Op::AddLayer(1)]);
        assert_eq!(recorder.states().last(), Some(&TriggerState::IDLE));
        assert_eq!(recorder.states().len(), 2);
    }

    #[tokio::test]
    async fn test_decode_failure_restores_trigger() {
        let service = FakeService::new(Err(PredictError::Decode("expected value".to_string())));
        let recorder = Recorder::default();
        let mut rendered = false;

        let result = run_prediction(&service, recorder.clone(), &form(), |_| {
            rendered = true;
            0
        })
        .await;

        assert!(matches!(result, Err(PredictError::Decode(_))));
        assert!(!rendered);
        assert_eq!(recorder.states().last(), Some(&TriggerState::IDLE));
    }

    #[tokio::test]
    async fn test_two_predictions_leave_one_layer() {
        let session = RefCell::new(CoverageSession::new(FakeSurface::default()));
        let f = form();
        for rssi in [[-100.0, -105.0], [-98.0, -99.0]] {
            let service = FakeService::new(Ok(collection(&rssi)));
            run_prediction(&service, Recorder::default(), &f, |fc| {
                session.borrow_mut().render(fc, f.rssi_threshold())
            })
            .await
            .unwrap();
        }
        assert_eq!(session.borrow().surface().layers.len(), 1);
    }

    #[tokio::test]
    async fn test_override_fields_sent_when_enabled() {
        let service = FakeService::new(Ok(collection(&[])));
        let mut f = form();
        f.set_override(true);

        run_prediction(&service, Recorder::default(), &f, |_| 0)
            .await
            .unwrap();

        let sent = service.seen.borrow().clone().unwrap();
        let overrides = sent.overrides.unwrap();
        assert_eq!(overrides.tx_power, 30.0);
        assert_eq!(overrides.frequency, 903.0);
        assert_eq!(overrides.additional_loss, 0.0);
        assert_eq!(overrides.rx_sensitivity, -130.0);
    }
}

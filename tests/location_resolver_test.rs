use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use geovideo_core::location::{
    AddressCandidate, Coordinate, GeocodeProvider, LocationError, LocationService,
    ProviderRegistry, PROVIDER_COORDINATE,
};

enum StubBehavior {
    Fail,
    Candidate(AddressCandidate),
}

struct StubProvider {
    name: &'static str,
    behavior: StubBehavior,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    fn new(name: &'static str, behavior: StubBehavior) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(StubProvider {
            name,
            behavior,
            calls: calls.clone(),
        });
        (provider, calls)
    }
}

#[async_trait]
impl GeocodeProvider for StubProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn reverse_geocode(
        &self,
        _coordinate: &Coordinate,
    ) -> Result<AddressCandidate, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Fail => Err(LocationError::ProviderError("stub failure".to_string())),
            StubBehavior::Candidate(candidate) => Ok(candidate.clone()),
        }
    }
}

fn city_only(city: &str) -> AddressCandidate {
    AddressCandidate {
        city: Some(city.to_string()),
        ..Default::default()
    }
}

fn full_candidate() -> AddressCandidate {
    AddressCandidate {
        city: Some("Bengaluru".to_string()),
        area: Some("Koramangala".to_string()),
        water_body: Some("Vrishabhavathi".to_string()),
        ..Default::default()
    }
}

fn service(registry: ProviderRegistry) -> LocationService {
    LocationService::with_registry(registry, Duration::from_millis(2000))
}

#[test]
fn incomplete_candidate_falls_through_to_next_provider() {
    // Stage 1 yields a city but no water/highway/road; the chain must try
    // stage 2 before any placeholder.
    let (first, first_calls) =
        StubProvider::new("FIRST", StubBehavior::Candidate(city_only("Bengaluru")));
    let (second, second_calls) =
        StubProvider::new("SECOND", StubBehavior::Candidate(full_candidate()));
    let service = service(ProviderRegistry::with_providers(
        vec![first, second],
        vec![],
    ));

    let resolved = tokio_test::block_on(service.resolve(Coordinate::new(12.9361, 77.6107)));

    assert_eq!(
        resolved.label,
        "Bengaluru : Koramangala : Vrishabhavathi River"
    );
    assert_eq!(resolved.source, "SECOND");
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_providers_degrade_to_coordinate_label() {
    let (first, _) = StubProvider::new("FIRST", StubBehavior::Fail);
    let (second, _) = StubProvider::new("SECOND", StubBehavior::Fail);
    let service = service(ProviderRegistry::with_providers(
        vec![first, second],
        vec![],
    ));

    let resolved = tokio_test::block_on(service.resolve(Coordinate::new(12.9, 77.6)));

    assert_eq!(
        resolved.label,
        "Northeast Region : Coordinate Area : Local Route (12.9000, 77.6000)"
    );
    assert_eq!(resolved.source, PROVIDER_COORDINATE);
}

#[test]
fn southern_coordinates_get_the_southeast_quadrant() {
    let service = service(ProviderRegistry::with_providers(vec![], vec![]));

    let resolved = tokio_test::block_on(service.resolve(Coordinate::new(-12.9, 77.6)));

    assert_eq!(
        resolved.label,
        "Southeast Region : Coordinate Area : Local Route (-12.9000, 77.6000)"
    );
}

#[test]
fn fallback_race_isolates_branch_errors() {
    let (primary, _) = StubProvider::new("PRIMARY", StubBehavior::Fail);
    let (broken, _) = StubProvider::new("BROKEN_FALLBACK", StubBehavior::Fail);
    let mut candidate = city_only("Bengaluru");
    candidate.road = Some("Local Area".to_string());
    let (working, _) = StubProvider::new("WORKING_FALLBACK", StubBehavior::Candidate(candidate));
    let service = service(ProviderRegistry::with_providers(
        vec![primary],
        vec![broken, working],
    ));

    let resolved = tokio_test::block_on(service.resolve(Coordinate::new(12.9361, 77.6107)));

    assert_eq!(resolved.label, "Bengaluru : Local Area");
    assert_eq!(resolved.source, "WORKING_FALLBACK");
}

#[test]
fn fallback_without_city_is_rejected() {
    let (primary, _) = StubProvider::new("PRIMARY", StubBehavior::Fail);
    let mut candidate = AddressCandidate::default();
    candidate.road = Some("Local Area".to_string());
    let (fallback, _) = StubProvider::new("FALLBACK", StubBehavior::Candidate(candidate));
    let service = service(ProviderRegistry::with_providers(
        vec![primary],
        vec![fallback],
    ));

    let resolved = tokio_test::block_on(service.resolve(Coordinate::new(12.9, 77.6)));

    assert_eq!(resolved.source, PROVIDER_COORDINATE);
}

#[test]
fn every_provider_is_attempted_at_most_once_per_lookup() {
    let (first, first_calls) = StubProvider::new("FIRST", StubBehavior::Fail);
    let (second, second_calls) = StubProvider::new("SECOND", StubBehavior::Fail);
    let (fallback, fallback_calls) = StubProvider::new("FALLBACK", StubBehavior::Fail);
    let service = service(ProviderRegistry::with_providers(
        vec![first, second],
        vec![fallback],
    ));

    tokio_test::block_on(service.resolve(Coordinate::new(12.9, 77.6)));

    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn resolution_is_idempotent_for_identical_responses() {
    let (provider, _) = StubProvider::new("STUB", StubBehavior::Candidate(full_candidate()));
    let service = service(ProviderRegistry::with_providers(vec![provider], vec![]));
    let coordinate = Coordinate::new(12.9361, 77.6107);

    let first = tokio_test::block_on(service.resolve(coordinate));
    let second = tokio_test::block_on(service.resolve(coordinate));

    assert_eq!(first.label, second.label);
    assert_eq!(first.source, second.source);
}

#[test]
fn sequence_numbers_increase_per_lookup() {
    let (provider, _) = StubProvider::new("STUB", StubBehavior::Candidate(full_candidate()));
    let service = service(ProviderRegistry::with_providers(vec![provider], vec![]));

    let first = tokio_test::block_on(service.resolve(Coordinate::new(12.9, 77.6)));
    let second = tokio_test::block_on(service.resolve(Coordinate::new(13.0, 80.2)));

    assert_eq!(first.sequence, 1);
    assert_eq!(second.sequence, 2);
}

#[test]
fn repeated_updates_for_the_same_coordinates_are_gated() {
    let (provider, calls) = StubProvider::new("STUB", StubBehavior::Candidate(full_candidate()));
    let service = service(ProviderRegistry::with_providers(vec![provider], vec![]));

    let first = tokio_test::block_on(service.on_location_update(12.936080, 77.610699));
    let second = tokio_test::block_on(service.on_location_update(12.936081, 77.610698));

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn rapid_updates_for_different_coordinates_are_gated_globally() {
    let (provider, calls) = StubProvider::new("STUB", StubBehavior::Candidate(full_candidate()));
    let service = service(ProviderRegistry::with_providers(vec![provider], vec![]));

    let first = tokio_test::block_on(service.on_location_update(12.9361, 77.6107));
    let second = tokio_test::block_on(service.on_location_update(13.0827, 80.2707));

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

//! Coordinator/worker pipeline round trip
//!
//! Drives a realistic search-pipeline conversation across two threads: the
//! coordinator pushes the bank input, a template bank and the data segments;
//! the worker pushes its candidates back. Every exchange is negotiated,
//! transferred in lock-step order and closed with the handshake.

use std::thread;

use exchange::{ChannelTransport, Exchange, ExchangeConfig, ExchangeSession, Result};
use types::{BankParams, CandidateEvent, DataSegment, GpsTime, ObjectKind, TemplateEntry};

const NUM_TEMPLATES: u32 = 5;
const NUM_SEGMENTS: u32 = 2;
const NUM_EVENTS: u32 = 3;
const STRAIN_LEN: usize = 256;
const SPECTRUM_LEN: usize = 129;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn verbose() -> ExchangeConfig {
    ExchangeConfig { verbose: true }
}

fn make_segment(number: u32, last: bool) -> DataSegment {
    let mut segment = DataSegment::with_lengths(STRAIN_LEN, SPECTRUM_LEN, SPECTRUM_LEN);
    segment.number = number;
    segment.end_of_data = last;
    segment.new_lock = number == 0;
    segment.strain.epoch = GpsTime::new(714_200_000 + number as i32, 0);
    segment.strain.delta_t = 1.0 / 16384.0;
    for (i, s) in segment.strain.data.iter_mut().enumerate() {
        *s = ((i as u32).wrapping_mul(number + 7) % 11) as i16 - 5;
    }
    segment.spectrum.delta_f = 64.0;
    for (i, s) in segment.spectrum.data.iter_mut().enumerate() {
        *s = 1.0e-3 * (1.0 + i as f32);
    }
    segment.response.delta_f = 64.0;
    for (i, c) in segment.response.data.iter_mut().enumerate() {
        c.re = (number + 1) as f32;
        c.im = i as f32 * 0.5;
    }
    segment
}

fn coordinator(transport: &ChannelTransport) -> Result<Vec<CandidateEvent>> {
    let send_to_worker = |kind: ObjectKind, num_objects: u32| ExchangeSession {
        object_type: kind.into(),
        is_sender: true,
        num_objects,
        peer: 1,
    };

    // Bank generation input
    let mut exchange = Exchange::initiate(transport, send_to_worker(ObjectKind::BankParams, 1), verbose())?;
    let mut bank = BankParams {
        mass_min: 1.0,
        mass_max: 3.0,
        f_lower: 40.0,
        f_upper: 2048.0,
        min_match: 0.97,
        num_coarse: 50,
        _reserved: 0,
    };
    exchange.transfer_record(&mut bank)?;
    exchange.finish()?;

    // Template bank
    let mut exchange = Exchange::initiate(
        transport,
        send_to_worker(ObjectKind::Template, NUM_TEMPLATES),
        verbose(),
    )?;
    for id in 0..NUM_TEMPLATES {
        let mut tmplt = TemplateEntry {
            mass1: 1.3 + 0.1 * f64::from(id),
            mass2: 1.3,
            chirp_mass: 1.15 + 0.05 * f64::from(id),
            eta: 0.25,
            tau0: 30.0 - f64::from(id),
            tau3: 1.2,
            f_final: 1570.0,
            template_id: id,
            _reserved: 0,
        };
        exchange.transfer_record(&mut tmplt)?;
    }
    exchange.finish()?;

    // Data segments
    let mut exchange = Exchange::initiate(
        transport,
        send_to_worker(ObjectKind::DataSegment, NUM_SEGMENTS),
        verbose(),
    )?;
    for number in 0..NUM_SEGMENTS {
        let mut segment = make_segment(number, number + 1 == NUM_SEGMENTS);
        exchange.transfer_segment(&mut segment)?;
    }
    exchange.finish()?;

    // Candidates come back; the worker initiates this one
    let mut exchange = Exchange::respond(transport, verbose())?;
    assert!(!exchange.is_sender());
    let mut events = Vec::new();
    for _ in 0..exchange.session().num_objects {
        let mut event = CandidateEvent::default();
        exchange.transfer_record(&mut event)?;
        events.push(event);
    }
    exchange.finish()?;
    Ok(events)
}

fn worker(transport: &ChannelTransport) -> Result<(BankParams, Vec<TemplateEntry>, Vec<DataSegment>)> {
    // Bank generation input
    let mut exchange = Exchange::respond(transport, verbose())?;
    assert_eq!(exchange.session().object_type, i32::from(ObjectKind::BankParams));
    assert!(!exchange.is_sender());
    let mut bank = BankParams::default();
    exchange.transfer_record(&mut bank)?;
    exchange.finish()?;

    // Template bank
    let mut exchange = Exchange::respond(transport, verbose())?;
    let mut templates = Vec::new();
    for _ in 0..exchange.session().num_objects {
        let mut tmplt = TemplateEntry::default();
        exchange.transfer_record(&mut tmplt)?;
        templates.push(tmplt);
    }
    exchange.finish()?;

    // Data segments into pre-allocated buffers
    let mut exchange = Exchange::respond(transport, verbose())?;
    let mut segments = Vec::new();
    for _ in 0..exchange.session().num_objects {
        let mut segment = DataSegment::with_lengths(STRAIN_LEN, SPECTRUM_LEN, SPECTRUM_LEN);
        exchange.transfer_segment(&mut segment)?;
        segments.push(segment);
    }
    exchange.finish()?;

    // Report candidates back to the coordinator
    let mut exchange = Exchange::initiate(
        transport,
        ExchangeSession {
            object_type: ObjectKind::CandidateEvent.into(),
            is_sender: true,
            num_objects: NUM_EVENTS,
            peer: 0,
        },
        verbose(),
    )?;
    for id in 0..NUM_EVENTS {
        let mut event = CandidateEvent {
            chirp_mass: templates[id as usize].chirp_mass,
            end_time: GpsTime::new(714_200_001, 500_000_000 * id as i32),
            template_id: id,
            segment_number: id % NUM_SEGMENTS,
            snr: 8.0 + id as f32,
            chisq: 1.5,
            sigma: 0.25,
            effective_distance: 40.0,
        };
        exchange.transfer_record(&mut event)?;
    }
    exchange.finish()?;

    Ok((bank, templates, segments))
}

#[test]
fn test_pipeline_round_trip() {
    init_tracing();
    let (coordinator_end, worker_end) = ChannelTransport::pair();

    let worker_thread = thread::spawn(move || worker(&worker_end));
    let events = coordinator(&coordinator_end).unwrap();
    let (bank, templates, segments) = worker_thread.join().unwrap().unwrap();

    // Bank input arrived intact
    assert_eq!(bank.min_match, 0.97);
    assert_eq!(bank.num_coarse, 50);

    // Every template arrived in order
    assert_eq!(templates.len(), NUM_TEMPLATES as usize);
    for (id, tmplt) in templates.iter().enumerate() {
        assert_eq!(tmplt.template_id, id as u32);
        assert_eq!(tmplt.mass1, 1.3 + 0.1 * id as f64);
    }

    // Segments arrived with header scalars and samples intact
    assert_eq!(segments.len(), NUM_SEGMENTS as usize);
    for (number, segment) in segments.iter().enumerate() {
        assert_eq!(*segment, make_segment(number as u32, number + 1 == NUM_SEGMENTS as usize));
    }
    assert!(segments.last().unwrap().end_of_data);

    // Candidates came back tied to their templates
    assert_eq!(events.len(), NUM_EVENTS as usize);
    for (id, event) in events.iter().enumerate() {
        assert_eq!(event.template_id, id as u32);
        assert_eq!(event.chirp_mass, templates[id].chirp_mass);
    }
}

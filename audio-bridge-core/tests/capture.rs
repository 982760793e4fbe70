//! Capture read and flush behavior against a scripted host.

mod common;

use std::sync::Arc;

use audio_bridge_core::{DeviceSession, Direction, SampleFormat, StreamFormat};
use common::{HostCall, ScriptedHost};

fn open_capture(
    host: &Arc<ScriptedHost>,
    format: SampleFormat,
    frames: u32,
) -> DeviceSession<ScriptedHost> {
    let mut session = DeviceSession::new(Arc::clone(host), Direction::Capture);
    session
        .open(
            0,
            &StreamFormat {
                sample_rate: 48000,
                format,
                channels: 1,
                frames_per_buffer: frames,
            },
        )
        .unwrap();
    session
}

#[test]
fn read_copies_host_samples_as_bytes() {
    let host = Arc::new(ScriptedHost::new());
    let mut session = open_capture(&host, SampleFormat::S16, 4);
    host.set_capture_elems(4);

    let mut dst = [0u8; 8];
    let bytes = session.channel_mut().unwrap().read(&mut dst);

    assert_eq!(bytes, 8);
    let mut expected = [0u8; 8];
    for (i, chunk) in expected.chunks_exact_mut(2).enumerate() {
        chunk.copy_from_slice(&(i as i16).to_ne_bytes());
    }
    assert_eq!(dst, expected);
    assert!(host.calls().contains(&HostCall::ReadShort { blocking: true }));
}

#[test]
fn read_uses_the_wire_call_for_the_negotiated_encoding() {
    let host = Arc::new(ScriptedHost::new());
    let mut session = open_capture(&host, SampleFormat::U8, 8);
    host.set_capture_elems(8);

    let mut dst = [0u8; 8];
    session.channel_mut().unwrap().read(&mut dst);

    assert!(host.calls().contains(&HostCall::ReadByte { blocking: true }));
    assert!(!host
        .calls()
        .iter()
        .any(|call| matches!(call, HostCall::ReadShort { .. } | HostCall::ReadFloat { .. })));
}

#[test]
fn partial_host_read_copies_only_what_arrived() {
    let host = Arc::new(ScriptedHost::new());
    let mut session = open_capture(&host, SampleFormat::S16, 4);
    host.set_capture_elems(2);

    let mut dst = [0xffu8; 8];
    let bytes = session.channel_mut().unwrap().read(&mut dst);

    assert_eq!(bytes, 4);
    assert_eq!(&dst[4..], &[0xff, 0xff, 0xff, 0xff]);
}

#[test]
fn failed_host_read_degrades_to_zero() {
    let host = Arc::new(ScriptedHost::new());
    let mut session = open_capture(&host, SampleFormat::F32, 4);
    host.set_capture_elems(-1);

    let mut dst = [0u8; 16];
    assert_eq!(session.channel_mut().unwrap().read(&mut dst), 0);

    host.set_capture_elems(0);
    assert_eq!(session.channel_mut().unwrap().read(&mut dst), 0);
}

#[test]
fn flush_issues_exactly_one_nonblocking_read() {
    let host = Arc::new(ScriptedHost::new());
    let mut session = open_capture(&host, SampleFormat::F32, 4);

    session.channel_mut().unwrap().flush();

    let reads: Vec<_> = host
        .calls()
        .into_iter()
        .filter(|call| {
            matches!(
                call,
                HostCall::ReadByte { .. } | HostCall::ReadShort { .. } | HostCall::ReadFloat { .. }
            )
        })
        .collect();
    assert_eq!(reads, vec![HostCall::ReadFloat { blocking: false }]);
}

#[test]
fn direction_misuse_is_a_logged_no_op() {
    let host = Arc::new(ScriptedHost::new());

    // reading or flushing an output channel does nothing
    let mut output = DeviceSession::new(Arc::clone(&host), Direction::Output);
    output
        .open(
            0,
            &StreamFormat {
                sample_rate: 48000,
                format: SampleFormat::S16,
                channels: 1,
                frames_per_buffer: 4,
            },
        )
        .unwrap();
    let opened_calls = host.call_count();
    let channel = output.channel_mut().unwrap();
    let mut dst = [0u8; 8];
    assert_eq!(channel.read(&mut dst), 0);
    channel.flush();
    assert_eq!(host.call_count(), opened_calls);

    // committing a capture channel does nothing
    let mut capture = open_capture(&host, SampleFormat::S16, 4);
    let opened_calls = host.call_count();
    capture.channel_mut().unwrap().commit();
    assert_eq!(host.call_count(), opened_calls);
}

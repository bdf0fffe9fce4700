// ABOUTME: Benchmarks for the simulator's hot paths on the wire
// ABOUTME: Measures PDU framing, submit_sm decoding and delivery receipt encoding

use bytes::{BufMut, Bytes, BytesMut};
use chrono::Local;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smsc_sim::codec::{encode_cstring, read_c_string};
use smsc_sim::datatypes::{CommandId, CommandStatus, DeliveryReceipt, SubmitSm};
use smsc_sim::Pdu;
use std::io::Cursor;
use std::time::Duration;

fn submit_sm_body(message: &str) -> Bytes {
    let mut body = BytesMut::new();
    encode_cstring(&mut body, "");
    body.put_slice(&[1, 1]);
    encode_cstring(&mut body, "SENDER");
    body.put_slice(&[1, 1]);
    encode_cstring(&mut body, "93791234567");
    body.put_slice(&[0, 0, 0]);
    encode_cstring(&mut body, "");
    encode_cstring(&mut body, "");
    body.put_slice(&[1, 0, 0, 0]);
    body.put_u8(message.len() as u8);
    body.put_slice(message.as_bytes());
    body.freeze()
}

fn bench_pdu_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdu_parse");
    group.measurement_time(Duration::from_secs(10));

    let enquire_link = Pdu::new(CommandId::EnquireLink, CommandStatus::Ok, 1, Bytes::new()).to_bytes();
    group.bench_function("enquire_link", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&enquire_link[..]));
            Pdu::parse(&mut cursor).unwrap()
        })
    });

    for size in [16usize, 160, 255] {
        let message = "x".repeat(size);
        let submit = Pdu::new(CommandId::SubmitSm, CommandStatus::Ok, 7, submit_sm_body(&message)).to_bytes();
        group.bench_with_input(BenchmarkId::new("submit_sm", size), &submit, |b, bytes| {
            b.iter(|| {
                let mut cursor = Cursor::new(black_box(&bytes[..]));
                Pdu::parse(&mut cursor).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_submit_sm_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_sm_decode");

    let body = submit_sm_body("Your verification code is 123456");
    group.bench_function("short_message", |b| {
        b.iter(|| SubmitSm::decode(black_box(&body)).unwrap())
    });

    let bind = b"roshan_gateway\0secret\0\0\x34\x01\x01\0";
    group.bench_function("read_c_string", |b| {
        b.iter(|| read_c_string(black_box(bind), 0))
    });

    group.finish();
}

fn bench_receipt_encode(c: &mut Criterion) {
    let now = Local::now();
    let receipt = DeliveryReceipt {
        message_id: "Roshan00000042".to_string(),
        handset: "93791234567".to_string(),
        original_text: "Your verification code is 123456".to_string(),
        submit_date: now,
        done_date: now,
    };

    c.bench_function("receipt_to_pdu", |b| {
        b.iter(|| black_box(&receipt).to_pdu(4242).to_bytes())
    });
}

criterion_group!(
    benches,
    bench_pdu_parse,
    bench_submit_sm_decode,
    bench_receipt_encode
);
criterion_main!(benches);

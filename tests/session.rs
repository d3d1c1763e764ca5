use std::collections::VecDeque;

use coredump_gdbstub::arch::arm::reg::id::CortexMRegId;
use coredump_gdbstub::arch::arm::ArmCortexM;
use coredump_gdbstub::arch::riscv::Riscv32;
use coredump_gdbstub::arch::Arch;
use coredump_gdbstub::common::Signal;
use coredump_gdbstub::conn::{Connection, ConnectionExt};
use coredump_gdbstub::coredump::zephyr::ZephyrCoreDump;
use coredump_gdbstub::coredump::{CoreDump, MemoryRegion};
use coredump_gdbstub::stub::{DisconnectReason, GdbStub, GdbStubBuilderError, GdbStubError};
use coredump_gdbstub::Session;

/// In-memory connection: reads come from a script, writes are recorded.
struct MockConn {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl MockConn {
    fn new(input: &[u8]) -> MockConn {
        MockConn {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }
}

impl Connection for MockConn {
    type Error = ();

    fn write(&mut self, byte: u8) -> Result<(), ()> {
        self.output.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

impl ConnectionExt for MockConn {
    fn read(&mut self) -> Result<Option<u8>, ()> {
        Ok(self.input.pop_front())
    }
}

struct TestDump {
    arch: Vec<u8>,
    regions: Vec<MemoryRegion>,
}

impl CoreDump for TestDump {
    fn arch_data(&self) -> &[u8] {
        &self.arch
    }

    fn memory_regions(&self) -> &[MemoryRegion] {
        &self.regions
    }
}

/// A Cortex-M whose data block only carries R0, PC and SP.
enum SparseCortexM {}

impl Arch for SparseCortexM {
    type Usize = u32;
    type RegId = CortexMRegId;

    const DATA_BLOCK_LAYOUT: &'static [CortexMRegId] =
        &[CortexMRegId::Gpr(0), CortexMRegId::Pc, CortexMRegId::Sp];
    const GROUP_LAYOUT: &'static [CortexMRegId] = ArmCortexM::GROUP_LAYOUT;
    const DEFAULT_SIGNAL: Signal = Signal::SIGEMT;
}

fn words(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

fn cortex_m_dump() -> TestDump {
    TestDump {
        arch: words(&[1, 0x0800_1000, 0x2000_1000]),
        regions: vec![
            MemoryRegion::new(0x2000, (0..0x20).collect()),
            MemoryRegion::new(0x2020, vec![0xff; 0x20]),
        ],
    }
}

fn packet(body: &str) -> Vec<u8> {
    let checksum = body.bytes().fold(0u8, |a, b| a.wrapping_add(b));
    format!("${}#{:02x}", body, checksum).into_bytes()
}

fn packets(bodies: &[&str]) -> Vec<u8> {
    bodies.iter().flat_map(|b| packet(b)).collect()
}

#[derive(Debug, PartialEq)]
enum Reply {
    Ack,
    Nack,
    Packet(String),
}

/// Split the stub's output into acks and (checksum-verified) packet payloads.
fn replies(output: &[u8]) -> Vec<Reply> {
    let mut replies = Vec::new();
    let mut i = 0;
    while i < output.len() {
        match output[i] {
            b'+' => {
                replies.push(Reply::Ack);
                i += 1;
            }
            b'-' => {
                replies.push(Reply::Nack);
                i += 1;
            }
            b'$' => {
                let hash = i + output[i..].iter().position(|&b| b == b'#').unwrap();
                let body = std::str::from_utf8(&output[i + 1..hash]).unwrap();
                let checksum = std::str::from_utf8(&output[hash + 1..hash + 3]).unwrap();
                assert_eq!(
                    checksum,
                    format!("{:02x}", body.bytes().fold(0u8, |a, b| a.wrapping_add(b)))
                );
                replies.push(Reply::Packet(body.to_string()));
                i = hash + 3;
            }
            other => panic!("unexpected byte {:#x} in output", other),
        }
    }
    replies
}

/// Packet payloads only, ignoring acks.
fn payloads(output: &[u8]) -> Vec<String> {
    replies(output)
        .into_iter()
        .filter_map(|r| match r {
            Reply::Packet(p) => Some(p),
            _ => None,
        })
        .collect()
}

fn run<A: Arch, D: CoreDump>(dump: &D, input: &[u8]) -> (DisconnectReason, Vec<u8>) {
    let _ = pretty_env_logger::try_init();

    let mut stub = GdbStub::new(MockConn::new(input), Session::<A, _>::new(dump));
    loop {
        let byte = match stub.borrow_conn().read().unwrap() {
            Some(byte) => byte,
            None => break (DisconnectReason::TransportClosed, stub.borrow_conn().output.clone()),
        };
        if let Some(reason) = stub.incoming_data(byte).unwrap() {
            break (reason, stub.borrow_conn().output.clone());
        }
    }
}

fn group_fields(g: &str, count: usize) -> Vec<&str> {
    assert_eq!(g.len(), count * 8);
    (0..count).map(|i| &g[i * 8..(i + 1) * 8]).collect()
}

#[test]
fn group_read_marks_missing_registers() {
    let dump = cortex_m_dump();
    let (_, out) = run::<SparseCortexM, _>(&dump, &packet("g"));

    let g = payloads(&out).remove(0);
    let fields = group_fields(&g, 17);
    for (i, field) in fields.iter().enumerate() {
        let expected = match i {
            0 => "01000000",
            13 => "00100020",
            15 => "00100008",
            _ => "xxxxxxxx",
        };
        assert_eq!(*field, expected, "register {}", i);
    }
}

#[test]
fn write_register_is_reflected_in_group_read() {
    let dump = cortex_m_dump();
    let (_, out) = run::<SparseCortexM, _>(&dump, &packets(&["P1=01020304", "g"]));

    let payloads = payloads(&out);
    assert_eq!(payloads[0], "OK");
    let fields = group_fields(&payloads[1], 17);
    assert_eq!(fields[1], "01020304");
    assert_eq!(fields[2], "xxxxxxxx");
}

#[test]
fn single_register_read_is_always_unavailable() {
    let dump = cortex_m_dump();
    let (_, out) = run::<SparseCortexM, _>(&dump, &packets(&["p0", "pf", "p40"]));

    assert_eq!(payloads(&out), vec!["xxxxxxxx"; 3]);
}

#[test]
fn corrupt_packet_is_nacked_and_dropped() {
    let dump = cortex_m_dump();
    let mut input = b"$P0=ffffffff#00".to_vec();
    input.extend(packet("g"));
    let (_, out) = run::<SparseCortexM, _>(&dump, &input);

    let replies = replies(&out);
    assert_eq!(replies[0], Reply::Nack);
    assert_eq!(replies[1], Reply::Ack);
    match &replies[2] {
        Reply::Packet(g) => assert_eq!(group_fields(g, 17)[0], "01000000"),
        other => panic!("expected g reply, got {:?}", other),
    }
    assert_eq!(replies.len(), 3);
}

#[test]
fn nack_retransmits_last_response() {
    let dump = cortex_m_dump();
    let mut input = packet("?");
    input.push(b'-');
    let (_, out) = run::<SparseCortexM, _>(&dump, &input);

    assert_eq!(out, b"+$S07#ba$S07#ba");
}

#[test]
fn stop_reply() {
    let dump = cortex_m_dump();
    let mut input = packets(&["?", "c", "s", "c8001000"]);
    input.push(0x03);
    let (_, out) = run::<ArmCortexM, _>(&dump, &input);

    assert_eq!(payloads(&out), vec!["S07"; 5]);
}

#[test]
fn memory_reads() {
    let dump = cortex_m_dump();
    let (_, out) = run::<SparseCortexM, _>(
        &dump,
        &packets(&["m2000,10", "m2018,10", "m1000,4", "m2030,10", "m9999,0"]),
    );

    let payloads = payloads(&out);
    assert_eq!(payloads[0], "000102030405060708090a0b0c0d0e0f");
    assert_eq!(payloads[1], "E0e");
    assert_eq!(payloads[2], "E0e");
    assert_eq!(payloads[3], "ff".repeat(0x10));
    assert_eq!(payloads[4], "");
}

#[test]
fn malformed_requests_keep_the_session_alive() {
    let dump = cortex_m_dump();
    let (reason, out) = run::<SparseCortexM, _>(
        &dump,
        &packets(&["mzz,4", "P=01", "P20=00000000", "P0=nothex", "pq", "?"]),
    );

    assert_eq!(reason, DisconnectReason::TransportClosed);
    assert_eq!(
        payloads(&out),
        vec!["E16", "E16", "E16", "E16", "E16", "S07"]
    );
}

#[test]
fn placeholder_digits_are_not_hex() {
    let dump = TestDump {
        arch: Vec::new(),
        regions: vec![MemoryRegion::new(0, vec![0xaa; 4])],
    };
    let (_, out) = run::<SparseCortexM, _>(
        &dump,
        &packets(&["Pxx=01020304", "P1=xxxxxxxx", "mxx,4", "pxx", "g"]),
    );

    let payloads = payloads(&out);
    assert_eq!(payloads[..4], ["E16", "E16", "E16", "E16"]);
    for (i, field) in group_fields(&payloads[4], 17).iter().enumerate() {
        assert_eq!(*field, "xxxxxxxx", "register {}", i);
    }
}

#[test]
fn handshake_and_no_ack_mode() {
    let dump = cortex_m_dump();
    let (_, out) = run::<ArmCortexM, _>(
        &dump,
        &packets(&[
            "qSupported:multiprocess+;swbreak+;hwbreak+;xmlRegisters=i386",
            "QStartNoAckMode",
            "Hg0",
            "qAttached",
            "vMustReplyEmpty",
            "?",
        ]),
    );

    assert_eq!(
        replies(&out),
        vec![
            Reply::Ack,
            Reply::Packet("PacketSize=1000;QStartNoAckMode+".into()),
            Reply::Ack,
            Reply::Packet("OK".into()),
            // no more acks from here on
            Reply::Packet("OK".into()),
            Reply::Packet("1".into()),
            Reply::Packet("".into()),
            Reply::Packet("S07".into()),
        ]
    );
}

#[test]
fn no_ack_mode_can_be_refused() {
    let dump = cortex_m_dump();
    let session = Session::<ArmCortexM, _>::new(&dump);
    let conn = MockConn::new(&packets(&["qSupported", "QStartNoAckMode", "?"]));
    let stub = GdbStub::builder(conn, session)
        .no_ack_mode(false)
        .packet_buffer_size(0x200)
        .build()
        .unwrap();

    let mut stub = stub;
    while let Some(byte) = stub.borrow_conn().read().unwrap() {
        stub.incoming_data(byte).unwrap();
    }

    assert_eq!(
        replies(&stub.borrow_conn().output),
        vec![
            Reply::Ack,
            Reply::Packet("PacketSize=0200".into()),
            Reply::Ack,
            Reply::Packet("".into()),
            Reply::Ack,
            Reply::Packet("S07".into()),
        ]
    );
}

#[test]
fn disconnects() {
    let dump = cortex_m_dump();

    let (reason, out) = run::<ArmCortexM, _>(&dump, &packets(&["k", "?"]));
    assert_eq!(reason, DisconnectReason::Kill);
    assert_eq!(out, b"+");

    let (reason, out) = run::<ArmCortexM, _>(&dump, &packets(&["D", "?"]));
    assert_eq!(reason, DisconnectReason::Disconnect);
    assert_eq!(payloads(&out), vec!["OK"]);

    let (reason, out) = run::<ArmCortexM, _>(&dump, &packets(&["D;1", "?"]));
    assert_eq!(reason, DisconnectReason::Disconnect);
    assert_eq!(payloads(&out), vec!["OK"]);

    let session = Session::<ArmCortexM, _>::new(&dump);
    let reason = GdbStub::new(MockConn::new(&packet("?")), session)
        .run_blocking()
        .unwrap();
    assert_eq!(reason, DisconnectReason::TransportClosed);
}

#[test]
fn oversized_packet_is_fatal() {
    let dump = cortex_m_dump();
    let session = Session::<ArmCortexM, _>::new(&dump);
    let big = format!("qSupported:{}", "x".repeat(300));
    let stub = GdbStub::builder(MockConn::new(&packet(&big)), session)
        .packet_buffer_size(256)
        .build()
        .unwrap();

    match stub.run_blocking() {
        Err(GdbStubError::PacketBufferOverflow) => {}
        other => panic!("expected overflow, got {:?}", other),
    }
}

#[test]
fn tiny_packet_buffer_is_rejected() {
    let dump = cortex_m_dump();
    let session = Session::<ArmCortexM, _>::new(&dump);
    let err = GdbStub::builder(MockConn::new(b""), session)
        .packet_buffer_size(16)
        .build()
        .err();

    assert_eq!(err, Some(GdbStubBuilderError::PacketBufferTooSmall(16)));
}

#[test]
fn zephyr_riscv_dump_end_to_end() {
    let mut raw = b"ZE".to_vec();
    raw.extend_from_slice(&2u16.to_le_bytes()); // header version
    raw.extend_from_slice(&4u16.to_le_bytes()); // RISC-V
    raw.extend_from_slice(&[5, 0]); // 32-bit pointers, flags
    raw.extend_from_slice(&0u32.to_le_bytes()); // K_ERR_CPU_EXCEPTION

    // v2 block: RA, TP, T0-T2, A0-A7, T3-T6, PC, SP
    let regs: Vec<u32> = (1..=19).collect();
    raw.push(b'A');
    raw.extend_from_slice(&2u16.to_le_bytes());
    raw.extend_from_slice(&((regs.len() * 4) as u16).to_le_bytes());
    raw.extend(words(&regs));

    raw.push(b'M');
    raw.extend_from_slice(&1u16.to_le_bytes());
    raw.extend_from_slice(&0x8000_0000u32.to_le_bytes());
    raw.extend_from_slice(&0x8000_0004u32.to_le_bytes());
    raw.extend_from_slice(&[0x13, 0x00, 0x00, 0x00]);

    let dump = ZephyrCoreDump::from_bytes(&raw).unwrap();
    let (_, out) = run::<Riscv32, _>(&dump, &packets(&["g", "m80000000,4"]));

    let payloads = payloads(&out);
    let fields = group_fields(&payloads[0], 33);
    assert_eq!(fields[0], "xxxxxxxx"); // zero
    assert_eq!(fields[1], "01000000"); // ra
    assert_eq!(fields[2], "13000000"); // sp
    assert_eq!(fields[3], "xxxxxxxx"); // gp
    assert_eq!(fields[4], "02000000"); // tp
    assert_eq!(fields[10], "06000000"); // a0
    assert_eq!(fields[8], "xxxxxxxx"); // s0
    assert_eq!(fields[31], "11000000"); // t6
    assert_eq!(fields[32], "12000000"); // pc
    assert_eq!(payloads[1], "13000000");
}

use super::prelude::*;
use crate::protocol::commands::{m, p, qSupported, P};

impl<A: Arch, C: Connection> GdbStubImpl<A, C> {
    pub(super) fn handle_q_supported(
        &mut self,
        res: &mut ResponseWriter<'_, C>,
        cmd: qSupported<'_>,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        for feature in cmd.features.into_iter() {
            match feature {
                Ok(feature) => trace!(
                    "client feature: {} ({:?})",
                    alloc::string::String::from_utf8_lossy(feature.name),
                    feature.status
                ),
                Err(e) => warn!("malformed qSupported feature: {}", e),
            }
        }

        res.write_str("PacketSize=")?;
        res.write_num(self.packet_buffer_len)?;
        if self.allow_no_ack_mode {
            res.write_str(";QStartNoAckMode+")?;
        }

        Ok(HandlerStatus::Handled)
    }

    pub(super) fn handle_read_registers<D: CoreDump + ?Sized>(
        &mut self,
        res: &mut ResponseWriter<'_, C>,
        session: &Session<'_, A, D>,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        let mut err = Ok(());
        session.registers().gdb_serialize(|val| {
            let result = match val {
                Some(b) => res.write_hex(b),
                None => res.write_str("xx"),
            };
            if let Err(e) = result {
                err = Err(e);
            }
        });
        err?;

        Ok(HandlerStatus::Handled)
    }

    pub(super) fn handle_read_register(
        &mut self,
        res: &mut ResponseWriter<'_, C>,
        cmd: p,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        // `p` is only ever sent for registers outside of the `g` packet, none
        // of which a core dump carries. Known registers are reported as
        // unavailable too, as GDB never sends `p` for those.
        trace!("reporting register {} as unavailable", cmd.reg_id);
        for _ in 0..A::reg_size() {
            res.write_str("xx")?;
        }

        Ok(HandlerStatus::Handled)
    }

    pub(super) fn handle_write_register<D: CoreDump + ?Sized>(
        &mut self,
        session: &mut Session<'_, A, D>,
        cmd: P<'_>,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        let id = session.write_register(cmd.reg_id, cmd.val).handle_error()?;
        debug!("register {:?} overwritten (for this session only)", id);

        Ok(HandlerStatus::NeedsOk)
    }

    pub(super) fn handle_read_memory<D: CoreDump + ?Sized>(
        &mut self,
        res: &mut ResponseWriter<'_, C>,
        session: &Session<'_, A, D>,
        cmd: m,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        let data = session.read_memory(cmd.addr, cmd.len).handle_error()?;
        res.write_hex_buf(data)?;

        Ok(HandlerStatus::Handled)
    }
}

use super::prelude::*;

impl<A: Arch, C: Connection> GdbStubImpl<A, C> {
    /// Write the stop reply for the (only) stop a core dump ever has.
    pub(super) fn write_stop_reply<D: CoreDump + ?Sized>(
        &self,
        res: &mut ResponseWriter<'_, C>,
        session: &Session<'_, A, D>,
    ) -> Result<(), Error<C::Error>> {
        res.write_str("S")?;
        res.write_hex(session.signal().0)?;
        Ok(())
    }

    pub(super) fn handle_resume<D: CoreDump + ?Sized>(
        &mut self,
        res: &mut ResponseWriter<'_, C>,
        session: &Session<'_, A, D>,
        addr: Option<u64>,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        if let Some(addr) = addr {
            debug!("ignoring resume address {:#x}", addr);
        }
        warn!("a core dump cannot be resumed, reporting the original stop");
        self.write_stop_reply(res, session)?;
        Ok(HandlerStatus::Handled)
    }
}

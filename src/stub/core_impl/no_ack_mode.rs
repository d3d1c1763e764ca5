use super::prelude::*;

impl<A: Arch, C: Connection> GdbStubImpl<A, C> {
    pub(super) fn handle_no_ack_mode(
        &mut self,
        _res: &mut ResponseWriter<'_, C>,
    ) -> Result<HandlerStatus, Error<C::Error>> {
        if !self.allow_no_ack_mode {
            return Ok(HandlerStatus::Handled);
        }

        debug!("entering no-ack mode");
        self.features.set_no_ack_mode(true);
        Ok(HandlerStatus::NeedsOk)
    }
}

use crate::error::AppError;
use crate::state::AppState;
use rail_core::Section;
use rail_proto::{
    ModifySeatRequest, Receipt, RemoveUserResponse, SectionDetails, SectionRequest, TicketRequest,
    TrainService, TrainServiceServer, User,
};
use rail_shared::SeatChangedEvent;
use tonic::{Request, Response, Status};
use tracing::warn;

/// gRPC front for the booking ledger.
#[derive(Clone)]
pub struct BookingService {
    state: AppState,
}

impl BookingService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn into_server(self) -> TrainServiceServer<Self> {
        TrainServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl TrainService for BookingService {
    async fn purchase_ticket(
        &self,
        request: Request<TicketRequest>,
    ) -> Result<Response<Receipt>, Status> {
        let req = request.into_inner();
        let user = req.user.map(rail_core::User::from).unwrap_or_default();

        let receipt = self.state.ledger.purchase_ticket(req.from, req.to, user);
        self.state.publish(SeatChangedEvent::assigned(&receipt.seat));

        Ok(Response::new(receipt.into()))
    }

    async fn get_receipt_details(
        &self,
        request: Request<User>,
    ) -> Result<Response<Receipt>, Status> {
        let seat = request.into_inner().seat;

        let receipt = self
            .state
            .ledger
            .receipt_details(&seat)
            .map_err(AppError::from)?;

        Ok(Response::new(receipt.into()))
    }

    async fn get_section_details(
        &self,
        request: Request<SectionRequest>,
    ) -> Result<Response<SectionDetails>, Status> {
        let raw = request.into_inner().section;

        let details = match Section::parse(&raw) {
            Some(section) => self.state.ledger.section_details(section).into(),
            None => {
                warn!(section = %raw, "Unknown section requested");
                SectionDetails::default()
            }
        };

        Ok(Response::new(details))
    }

    async fn modify_user_seat(
        &self,
        request: Request<ModifySeatRequest>,
    ) -> Result<Response<Receipt>, Status> {
        let req = request.into_inner();
        let seat = req.user.map(|u| u.seat).unwrap_or_default();

        let receipt = self
            .state
            .ledger
            .modify_user_seat(&seat, &req.new_seat)
            .map_err(AppError::from)?;
        self.state
            .publish(SeatChangedEvent::reassigned(seat, &receipt.seat));

        Ok(Response::new(receipt.into()))
    }

    async fn remove_user(
        &self,
        request: Request<User>,
    ) -> Result<Response<RemoveUserResponse>, Status> {
        let seat = request.into_inner().seat;

        let success = self
            .state
            .ledger
            .remove_user(&seat)
            .map_err(AppError::from)?;
        self.state.publish(SeatChangedEvent::released(seat));

        Ok(Response::new(RemoveUserResponse { success }))
    }
}

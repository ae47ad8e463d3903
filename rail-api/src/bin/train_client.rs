//! Walks a running server through the whole booking lifecycle.

use anyhow::Context;
use rail_proto::{
    ModifySeatRequest, SectionRequest, TicketRequest, TrainServiceClient, User,
};
use tonic::transport::Channel;
use tracing::info;

type Client = TrainServiceClient<Channel>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "train_client=info".into()),
        )
        .init();

    let endpoint =
        std::env::var("TRAIN_ENDPOINT").unwrap_or_else(|_| "http://localhost:50051".into());
    let mut client = TrainServiceClient::connect(endpoint.clone())
        .await
        .with_context(|| format!("Failed to connect to server at {}", endpoint))?;

    purchase_ticket(&mut client).await?;
    get_receipt_details(&mut client).await?;
    get_section_details(&mut client).await?;
    modify_user_seat(&mut client).await?;
    remove_user(&mut client).await?;

    Ok(())
}

fn seat(label: &str) -> User {
    User {
        seat: label.to_string(),
        ..User::default()
    }
}

async fn purchase_ticket(client: &mut Client) -> anyhow::Result<()> {
    let req = TicketRequest {
        from: "London".to_string(),
        to: "France".to_string(),
        user: Some(User {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            seat: String::new(),
        }),
    };

    let receipt = client
        .purchase_ticket(req)
        .await
        .context("Failed to purchase ticket")?
        .into_inner();

    info!(
        "Purchase successful. Receipt: from:{:?} to:{:?} price_paid:${} seat:{:?}",
        receipt.from, receipt.to, receipt.price_paid, receipt.seat
    );
    Ok(())
}

async fn get_receipt_details(client: &mut Client) -> anyhow::Result<()> {
    let receipt = client
        .get_receipt_details(seat("01"))
        .await
        .context("Failed to get receipt details")?
        .into_inner();

    info!(
        "Receipt details: from:{:?} to:{:?} user:{:?} price_paid:${} seat:{:?}",
        receipt.from, receipt.to, receipt.user, receipt.price_paid, receipt.seat
    );
    Ok(())
}

async fn get_section_details(client: &mut Client) -> anyhow::Result<()> {
    let details = client
        .get_section_details(SectionRequest {
            section: "A".to_string(),
        })
        .await
        .context("Failed to get section details")?
        .into_inner();

    info!("Section A details: {:?}", details.users);
    Ok(())
}

async fn modify_user_seat(client: &mut Client) -> anyhow::Result<()> {
    let receipt = client
        .modify_user_seat(ModifySeatRequest {
            user: Some(seat("01")),
            new_seat: "05".to_string(),
        })
        .await
        .context("Failed to modify user seat")?
        .into_inner();

    info!(
        "User seat modified. New receipt details: from:{:?} to:{:?} price_paid:${} seat:{:?}",
        receipt.from, receipt.to, receipt.price_paid, receipt.seat
    );
    Ok(())
}

async fn remove_user(client: &mut Client) -> anyhow::Result<()> {
    let response = client
        .remove_user(seat("05"))
        .await
        .context("Failed to remove user")?
        .into_inner();

    if response.success {
        info!("User removed successfully.");
    } else {
        info!("User removal failed.");
    }
    Ok(())
}

use tonic_build::manual::{Builder, Method, Service};

// Messages are hand-written prost structs in src/lib.rs; only the service
// plumbing is generated, so no protoc is needed.
fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    let train_service = Service::builder()
        .name("TrainService")
        .package("train")
        .method(unary(
            "purchase_ticket",
            "PurchaseTicket",
            "crate::TicketRequest",
            "crate::Receipt",
        ))
        .method(unary(
            "get_receipt_details",
            "GetReceiptDetails",
            "crate::User",
            "crate::Receipt",
        ))
        .method(unary(
            "get_section_details",
            "GetSectionDetails",
            "crate::SectionRequest",
            "crate::SectionDetails",
        ))
        .method(unary(
            "modify_user_seat",
            "ModifyUserSeat",
            "crate::ModifySeatRequest",
            "crate::Receipt",
        ))
        .method(unary(
            "remove_user",
            "RemoveUser",
            "crate::User",
            "crate::RemoveUserResponse",
        ))
        .build();

    Builder::new().compile(&[train_service]);
    println!("cargo:rerun-if-changed=build.rs");
}

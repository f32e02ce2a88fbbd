use cmdtree_core::transform::name_normalizer::{normalize_op_name, to_kebab};
use cmdtree_core::transform::path_resolver::{extract_path_params, path_from_raw};

#[test]
fn test_camel_case_input() {
    assert_eq!(to_kebab("createChatCompletion"), "create-chat-completion");
}

#[test]
fn test_pascal_case_input() {
    assert_eq!(to_kebab("PaymentMethods"), "payment-methods");
}

#[test]
fn test_snake_case_input() {
    assert_eq!(to_kebab("payment_methods"), "payment-methods");
}

#[test]
fn test_kebab_case_input() {
    assert_eq!(to_kebab("pet-store-api"), "pet-store-api");
}

#[test]
fn test_titled_input() {
    assert_eq!(to_kebab("Create Fixed Virtual Account"), "create-fixed-virtual-account");
}

#[test]
fn test_path_like_input() {
    assert_eq!(to_kebab("/pets/{petId}"), "pets-pet-id");
}

#[test]
fn test_empty_operation_name() {
    assert_eq!(normalize_op_name("   "), "call");
}

#[test]
fn test_postman_raw_urls() {
    assert_eq!(
        path_from_raw("{{baseUrl}}/v2/invoices/:invoice_id?expand=items"),
        "/v2/invoices/:invoice_id"
    );
    assert_eq!(
        extract_path_params(&path_from_raw("{{baseUrl}}/v2/invoices/:invoice_id")),
        vec!["invoice_id"]
    );
}

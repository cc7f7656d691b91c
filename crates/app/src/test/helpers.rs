//! Test Helpers

use reptitrack::products::{Product, ProductId, ProductStatus};
use rusty_money::{Money, iso};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use tracing::debug;

use crate::auth::{MockIdentity, UserDetail};

/// Active MXN product with plenty of stock.
pub(crate) fn product(id: i64, name: &str, price_minor: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: None,
        price: Money::from_minor(price_minor, iso::MXN),
        stock: 10,
        status: ProductStatus::ACTIVE,
    }
}

pub(crate) fn customer() -> UserDetail {
    UserDetail {
        id: "client-1".to_string(),
        full_name: Some("Ana Torres".to_string()),
        email: Some("ana@example.com".to_string()),
        roles: vec!["Customer".to_string()],
    }
}

/// Identity that always resolves to [`customer`].
pub(crate) fn identified() -> MockIdentity {
    let mut identity = MockIdentity::new();
    identity.expect_current_user().returning(|| Some(customer()));

    identity
}

/// Serve a single request with the raw HTTP `response`, returning the base URL.
pub(crate) async fn serve_once(response: &'static str) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];

        while !request_complete(&request) {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(buf.get(..n).unwrap_or_default()),
            }
        }

        if let Err(error) = stream.write_all(response.as_bytes()).await {
            debug!(%error, "test server could not answer");
        }
    });

    Ok(format!("http://{addr}/api"))
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);

    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };

    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    body.len() >= length
}

//! Attaches the widget to a printing host and plays the frame's side of the
//! conversation against the exposed methods.
//!
//! Run with `cargo run -p core-widget --example attach_demo`.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::layout::{ContainerStyle, FrameLayout, FrameStyle};
use bridge_traits::log::LogLevel;
use bridge_traits::transport::{ChildConnection, FrameTransport, MethodTable};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::{Network, WidgetEndpoints};
use core_wallet::{CustomWallet, HandlerError, TxData};
use core_widget::{WalletKind, WidgetBridge};
use serde_json::json;
use url::Url;

/// Host whose elements are just paths, printing every layout call.
#[derive(Default)]
struct PrintingHost {
    methods: Mutex<Option<MethodTable>>,
}

impl FrameLayout for PrintingHost {
    type Element = String;

    fn insert_container(&self, parent: &String, style: &ContainerStyle) -> BridgeResult<String> {
        println!("insert container under {} with {:?}", parent, style.css_declarations());
        Ok(format!("{} > div", parent))
    }

    fn create_frame(&self, url: &Url, append_to: &String) -> BridgeResult<String> {
        println!("plain frame {} under {}", url, append_to);
        Ok(format!("{} > iframe", append_to))
    }

    fn style_frame(&self, frame: &String, style: &FrameStyle) -> BridgeResult<()> {
        println!("style {} with {:?}", frame, style.css_declarations());
        Ok(())
    }
}

impl FrameTransport for PrintingHost {
    fn connect_to_child(
        &self,
        url: &Url,
        append_to: &String,
        methods: MethodTable,
    ) -> BridgeResult<ChildConnection<String>> {
        println!("connect {} under {} exposing {:?}", url, append_to, methods.names());
        if let Ok(mut slot) = self.methods.lock() {
            *slot = Some(methods);
        }
        Ok(ChildConnection {
            frame: format!("{} > iframe", append_to),
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug),
    )?;

    let wallet = CustomWallet::new("DemoWallet").with_icon_url("https://example.com/demo.svg");
    wallet
        .handle_get_accounts(|| async { Ok::<_, HandlerError>(vec!["0xABC".to_string()]) })
        .handle_sign_transaction(|tx: TxData| async move {
            match tx.to {
                Some(to) => Ok(format!("0xf86c...{}", to.trim_start_matches("0x"))),
                None => Err(HandlerError::user_rejected()),
            }
        });

    let bridge = WidgetBridge::new("swap1")
        .with_network(Network::Local)
        .with_endpoints(WidgetEndpoints::from_env()?)
        .set_default_amount(12.5)
        .set_wallets([WalletKind::Ledger, WalletKind::Custom])
        .set_custom_wallet_provider(wallet);

    let host = PrintingHost::default();
    let attachment = bridge.attach(&host, &"body".to_string())?;
    println!("attached {} at {}", attachment.frame, attachment.locator);

    let methods = host
        .methods
        .lock()
        .map_err(|_| anyhow!("host state poisoned"))?
        .take()
        .ok_or_else(|| anyhow!("no methods were exposed"))?;

    println!("getName -> {:?}", methods.call_sync("getName", vec![]));
    println!("getAccounts -> {:?}", methods.invoke("getAccounts", vec![]).await);
    println!(
        "signTransaction -> {:?}",
        methods
            .invoke("signTransaction", vec![json!({ "from": "0xABC", "to": "0xdef" })])
            .await
    );
    println!(
        "approveTransaction -> {:?}",
        methods.invoke("approveTransaction", vec![json!({})]).await
    );

    Ok(())
}

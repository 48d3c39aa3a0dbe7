//! Sign a message and verify it against the signer's address
//!
//! Run with: cargo run --example sign_verify

use bitcoinsig::{Network, PrivateKey, Secp256k1, verify_message};

fn main() -> bitcoinsig::Result<()> {
    println!("=== Bitcoin Signed Message ===\n");

    let alice = PrivateKey::generate(Network::Main);
    let bob = PrivateKey::generate(Network::Main);
    let version = Network::Main.version_byte();

    let message = "Alice controls this address";
    let signature = alice.sign_message(message)?;
    println!("Message:   {message:?}");
    println!("Address:   {}", alice.address());
    println!("Signature: {signature}\n");

    let check = |address: &str, text: &str| {
        if verify_message(&Secp256k1, address, &signature.to_base64(), text, version) {
            "VALID"
        } else {
            "INVALID"
        }
    };

    println!("Against Alice's address: {}", check(&alice.address(), message));
    println!("Against Bob's address:   {}", check(&bob.address(), message));
    println!(
        "Tampered message:        {}",
        check(&alice.address(), "Alice controls this address!")
    );

    Ok(())
}

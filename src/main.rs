//! Dilithium Bridge demonstration program

use dilithium_bridge::{
    keypair, keypair_from_seed, sign, sign_with_entropy, verify, verify_detailed,
    DilithiumParams, Result, DILITHIUM3,
};

fn main() -> Result<()> {
    println!("🔐 Dilithium Bridge: Post-Quantum Signature Core");
    println!("================================================");
    println!();

    display_parameters(DILITHIUM3);

    println!("🌱 Seeded key generation (all-zero seed):");
    demo_seeded()?;
    println!();

    println!("🎲 Randomized key generation (host entropy):");
    demo_randomized()?;
    println!();

    println!("✅ All demonstrations completed!");
    Ok(())
}

fn display_parameters(params: DilithiumParams) {
    println!("📊 {} (NIST security level {}):", params.name, params.nist_level);
    println!("  • Matrix dimensions (k, l): {:?}", params.dimensions);
    println!("  • Seed size: {} bytes", params.seed_len);
    println!("  • Public key size: {} bytes", params.public_key_len);
    println!("  • Secret key size: {} bytes", params.secret_key_len);
    println!("  • Signature size: {} bytes", params.signature_len);
    println!();
}

fn demo_seeded() -> Result<()> {
    let (public_key, secret_key) = keypair_from_seed(&[0u8; 32])?;
    println!("  🔑 Public key: {:?}", public_key);

    let message = b"abc";
    let signature = sign(message, &secret_key)?;
    println!("  ✍️  Signed \"abc\": {:?}", signature);

    let again = sign(message, &secret_key)?;
    println!(
        "  🔁 Deterministic: {}",
        if again == signature { "✅ identical" } else { "❌ differs" }
    );

    report("valid signature", verify(signature.as_bytes(), message, public_key.as_bytes()));

    let mut tampered = *signature.as_bytes();
    tampered[100] ^= 0x01;
    match verify_detailed(&tampered, message, public_key.as_bytes()) {
        Ok(()) => println!("  ❌ Tampered signature accepted"),
        Err(reason) => println!("  ✅ Tampered signature rejected: {}", reason),
    }

    Ok(())
}

fn demo_randomized() -> Result<()> {
    let (public_key, secret_key) = keypair()?;
    println!("  🔑 Public key: {:?}", public_key);

    let message = b"Hello from Dilithium Bridge! This is a post-quantum digital signature.";
    let signature = sign_with_entropy(message, &secret_key, &mut rand_core::OsRng)?;
    println!("  ✍️  Hedged signature: {} bytes", signature.len());

    report("valid signature", verify(signature.as_bytes(), message, public_key.as_bytes()));
    report(
        "wrong message rejected",
        !verify(signature.as_bytes(), b"This is a different message", public_key.as_bytes()),
    );

    Ok(())
}

fn report(what: &str, ok: bool) {
    if ok {
        println!("  ✅ {}", what);
    } else {
        println!("  ❌ {}", what);
    }
}

use huffman::{Codec, CodecConfig};

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Maya Huffman huffs at Huffman trees.".to_string());

    let codec = Codec::new(CodecConfig {
        verify_round_trip: true,
        ..CodecConfig::default()
    });

    let encoded = match codec.encode_text(&input) {
        Ok(encoded) => encoded,
        Err(e) => {
            eprintln!("encode failed: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("{}", encoded.tree);
    println!();
    println!("{}\n", encoded.bits);

    match codec.decode_text(&encoded.bits, &encoded.tree) {
        Ok(decoded) => println!("{}", decoded),
        Err(e) => {
            eprintln!("decode failed: {}", e);
            std::process::exit(1);
        }
    }

    println!(
        "\n{} chars -> {} bits ({} bits at 8 per char)",
        input.chars().count(),
        encoded.bits.len(),
        input.chars().count() * 8
    );
}

use std::io::Read;

use sbt_signer::ProfileRequest;

fn main() {
    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args();
    let _bin = args.next();

    match args.next().as_deref() {
        Some("sign") => {
            if !args.any(|a| a == "--stdin") {
                return Err("sign reads the profile from stdin: sbt-signer sign --stdin".into());
            }
            let request = parse_request_from_stdin()?;
            let key = sbt_signer::secret_key_from_env().map_err(|err| err.to_string())?;
            let signed = sbt_signer::sign_profile(&key, &request).map_err(|err| err.to_string())?;
            let output = sbt_signer::render_signed_profile(&signed).map_err(|err| err.to_string())?;
            println!("{output}");
            Ok(())
        }
        Some("address") => {
            let key = sbt_signer::secret_key_from_env().map_err(|err| err.to_string())?;
            let output = sbt_signer::render_key(&key, false).map_err(|err| err.to_string())?;
            println!("{output}");
            Ok(())
        }
        Some("keygen") => {
            let key = sbt_signer::generate_secret_key();
            let output = sbt_signer::render_key(&key, true).map_err(|err| err.to_string())?;
            println!("{output}");
            Ok(())
        }
        None => Err(usage()),
        Some(other) => Err(format!("unsupported command: {other}. {}", usage())),
    }
}

fn usage() -> String {
    "usage: sbt-signer [sign --stdin|address|keygen]".to_string()
}

#[derive(serde::Deserialize)]
struct JsonSignRequest {
    name: String,
    photo: String,
    twitter_id: String,
    discord_id: String,
    telegram_id: String,
    score: u64,
}

fn parse_request_from_stdin() -> Result<ProfileRequest, String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read stdin: {e}"))?;

    let json: JsonSignRequest =
        serde_json::from_str(&input).map_err(|e| format!("invalid JSON input: {e}"))?;

    Ok(ProfileRequest {
        name: json.name,
        photo: json.photo,
        twitter_id: json.twitter_id,
        discord_id: json.discord_id,
        telegram_id: json.telegram_id,
        score: json.score,
    })
}

//! Profile persistence wired into the prompt engine.

use promptdesk::profile::SellerProfile;
use promptdesk::prompt::{PromptMode, PromptSession, compile};
use time::macros::date;

#[test]
fn sample_profile_compiles_into_a_complete_prompt() {
    let profile = SellerProfile::sample();
    let prompt = compile(&profile.agent, &profile.tools, date!(2025 - 08 - 07));

    let first_line = prompt.lines().next().expect("first line");
    assert!(first_line.starts_with("Eres Sofia,"));
    assert!(first_line.contains("TechStore Pro"));

    // Enabled sample tools appear in catalog order; disabled ones do not.
    let buscar = prompt.find("- Buscar Productos").expect("products tool");
    let carrito = prompt.find("- Crear Carrito").expect("cart tool");
    assert!(buscar < carrito);
    assert!(!prompt.contains("- Agendar Cita"));

    // FAQ content from the sample configuration is rendered.
    assert!(prompt.contains("*¿Tienen garantía los productos?*"));
    assert!(prompt.contains("garantía del fabricante de 12 meses"));
}

#[test]
fn round_tripped_profile_compiles_byte_identically() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("profile.toml");
    let today = date!(2025 - 08 - 07);

    let profile = SellerProfile::sample();
    profile.save(&path).expect("save profile");
    let reloaded = SellerProfile::load(&path).expect("reload profile");

    assert_eq!(
        compile(&profile.agent, &profile.tools, today),
        compile(&reloaded.agent, &reloaded.tools, today)
    );
}

#[test]
fn saved_custom_prompt_resumes_in_the_session() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("profile.toml");

    let mut profile = SellerProfile::sample();
    profile.custom_prompt = "Eres el asistente de {tienda}.".to_string();
    profile.save(&path).expect("save profile");

    let reloaded = SellerProfile::load(&path).expect("reload profile");
    let mut session = PromptSession::with_custom_text(reloaded.custom_prompt.clone());

    // A restored session still starts generated, with the custom text ready.
    assert_eq!(session.mode(), PromptMode::SystemGenerated);
    session.select_custom();
    assert_eq!(
        session.active_text(&reloaded.agent, &reloaded.tools, date!(2025 - 08 - 07)),
        "Eres el asistente de {tienda}."
    );
}

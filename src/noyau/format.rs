// src/noyau/format.rs

/// Formate un résultat pour l’affichage (résultat courant + historique).
///
/// - valeur entière => sans point décimal ("15", pas "15.0")
/// - sinon => affichage f64 par défaut (aller-retour le plus court)
///
/// Le noyau garantit déjà la finitude; on ne formate donc jamais inf/NaN.
pub fn format_nombre(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

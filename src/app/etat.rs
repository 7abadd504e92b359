//! src/app/etat.rs
//!
//! État UI de la session (historique, tampon du pavé, champs de saisie).
//!
//! Rôle : contenir l’état de la calculatrice et offrir les actions discrètes
//! (ajout au tampon, retour, effacement, évaluation) sans logique d’affichage.
//!
//! Contrats :
//! - Le noyau reste pur : ici on ne fait qu’appeler `noyau::evaluer` et
//!   consorts, puis déposer résultat/erreur/historique.
//! - Échec d’évaluation => AUCUNE mutation : le tampon (ou le champ) reste
//!   tel quel, l’historique n’est pas touché, seule l’erreur est affichée.
//! - Succès via le pavé => le tampon est remis à vide.
//! - Historique : ajout en ordre d’évaluation; seule mutation possible :
//!   vidage complet. Non persisté (vie de la session).

use crate::noyau::{self, format_nombre};

/// Opérations du formulaire “deux nombres” (onglet basique).
pub const OPERATIONS: [&str; 5] = ["+", "-", "*", "/", "^"];

/// Une ligne d’historique : (affichage de l’entrée, affichage du résultat).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Onglet {
    Basique,
    Scientifique,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- navigation ---
    pub onglet: Onglet,

    // --- onglet basique ---
    pub expression_basique: String,
    pub nombre_a: f64,
    pub nombre_b: f64,
    pub operation: usize, // index dans OPERATIONS

    // --- onglet scientifique ---
    pub expression_sci: String,
    pub valeur_fonction: f64,
    pub fonction_choisie: usize, // index dans noyau::noms_fonctions()

    // --- pavé virtuel ---
    pub tampon: String,

    // --- sorties ---
    pub resultat: String, // dernier résultat affiché
    pub erreur: String,   // message d’erreur (vide si aucun)

    // --- historique de session ---
    pub historique: Vec<EntreeHistorique>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus au champ actif après un clic.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            onglet: Onglet::Basique,
            expression_basique: String::new(),
            nombre_a: 0.0,
            nombre_b: 0.0,
            operation: 0,
            expression_sci: String::new(),
            valeur_fonction: 0.0,
            fonction_choisie: 0,
            tampon: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            historique: Vec::new(),
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /* ------------------------ Sorties ------------------------ */

    fn set_resultat(&mut self, v: f64) {
        self.resultat = format_nombre(v);
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// Choix UX : on CONSERVE le dernier résultat affiché — une faute de
    /// frappe n’efface pas l’écran.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.focus_entree = true;
    }

    /* ------------------------ Historique ------------------------ */

    fn ajouter_historique(&mut self, expression: String, resultat: String) {
        self.historique.push(EntreeHistorique {
            expression,
            resultat,
        });
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /* ------------------------ Pavé virtuel (tampon) ------------------------ */

    pub fn tampon_ajouter(&mut self, txt: &str) {
        self.tampon.push_str(txt);
        self.focus_entree = true;
    }

    /// Retour “intelligent” : retire d’un coup les motifs insérés par les
    /// boutons ("sqrt(", "log("), sinon un caractère.
    pub fn tampon_retour(&mut self) {
        for pat in ["sqrt(", "log("] {
            if self.tampon.ends_with(pat) {
                for _ in 0..pat.chars().count() {
                    self.tampon.pop();
                }
                self.focus_entree = true;
                return;
            }
        }
        self.tampon.pop();
        self.focus_entree = true;
    }

    pub fn tampon_effacer(&mut self) {
        self.tampon.clear();
        self.focus_entree = true;
    }

    /// Évalue le contenu du tampon (pavé => mode scientifique).
    /// Succès : historique + remise à vide du tampon.
    /// Échec : tampon INTACT, pour correction.
    pub fn evaluer_tampon(&mut self) {
        match noyau::evaluer(&self.tampon, true) {
            Ok(v) => {
                let affiche = format_nombre(v);
                self.ajouter_historique(self.tampon.trim().to_string(), affiche);
                self.set_resultat(v);
                self.tampon.clear();
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /* ------------------------ Champs d’expression ------------------------ */

    /// Évalue le champ d’expression de l’onglet courant.
    /// Le champ n’est PAS vidé (contrairement au tampon du pavé).
    pub fn evaluer_champ(&mut self) {
        let (texte, scientifique) = match self.onglet {
            Onglet::Basique => (self.expression_basique.clone(), false),
            Onglet::Scientifique => (self.expression_sci.clone(), true),
        };

        match noyau::evaluer(&texte, scientifique) {
            Ok(v) => {
                let affiche = format_nombre(v);
                self.ajouter_historique(texte.trim().to_string(), affiche);
                self.set_resultat(v);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /* ------------------------ Formulaire deux nombres ------------------------ */

    /// a OP b, routé par le MÊME noyau que les expressions tapées
    /// (mêmes erreurs classées, même politique de finitude).
    pub fn calculer_operation(&mut self) {
        let op = OPERATIONS[self.operation.min(OPERATIONS.len() - 1)];
        let expr = format!("{} {} {}", self.nombre_a, op, self.nombre_b);

        match noyau::evaluer(&expr, false) {
            Ok(v) => {
                let affiche = format_nombre(v);
                self.ajouter_historique(expr, affiche);
                self.set_resultat(v);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /* ------------------------ Appliquer une fonction ------------------------ */

    pub fn appliquer_fonction_choisie(&mut self) {
        let noms = noyau::noms_fonctions();
        let nom = noms[self.fonction_choisie.min(noms.len() - 1)];

        match noyau::appliquer_fonction(self.valeur_fonction, nom) {
            Ok(v) => {
                let affiche = format_nombre(v);
                self.ajouter_historique(
                    format!("{nom}({})", format_nombre(self.valeur_fonction)),
                    affiche,
                );
                self.set_resultat(v);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /* ------------------------ Effacements ------------------------ */

    /// ESC / bouton C global : efface l’entrée active + l’erreur,
    /// sans toucher à l’historique ni au dernier résultat.
    pub fn effacer_entree_active(&mut self) {
        match self.onglet {
            Onglet::Basique => self.expression_basique.clear(),
            Onglet::Scientifique => {
                self.expression_sci.clear();
                self.tampon.clear();
            }
        }
        self.erreur.clear();
        self.focus_entree = true;
    }
}

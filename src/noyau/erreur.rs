// src/noyau/erreur.rs
//
// Erreurs classées du noyau.
// - Syntaxe      : expression malformée (parenthèses, entrée vide, opérateur pendant…)
// - Nom          : identifiant hors du registre (ou fonction indisponible dans ce mode)
// - Domaine      : argument hors du domaine d’une fonction (sqrt(-1), asin(2), …)
// - Arithmetique : division par zéro, exposant non entier sur base négative,
//                  résultat non fini
//
// Contrat : toute erreur est une VALEUR retournée à l’appelant, jamais un panic.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("nom inconnu : {0}")]
    Nom(String),

    #[error("hors domaine : {0}")]
    Domaine(String),

    #[error("erreur arithmétique : {0}")]
    Arithmetique(String),
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn nom(nom: impl Into<String>) -> Self {
        Self::Nom(nom.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        Self::Domaine(msg.into())
    }

    pub fn arithmetique(msg: impl Into<String>) -> Self {
        Self::Arithmetique(msg.into())
    }
}

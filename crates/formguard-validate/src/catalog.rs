//! Locale message catalogs.
//!
//! Templates use `{data0}`, `{data1}`, ... placeholders that the resolver
//! fills with the failing rule's parameters.

use crate::rules::RuleName;
use std::collections::HashMap;

/// Locale every lookup falls back to.
pub const DEFAULT_LOCALE: &str = "en";

/// Source of default per-rule message templates.
pub trait MessageCatalog: Send + Sync {
    /// Template for `rule` in `locale`, without any fallback to another locale.
    fn template(&self, locale: &str, rule: RuleName) -> Option<&str>;
}

const EN: &[(RuleName, &str)] = &[
    (RuleName::Required, "This field is required."),
    (RuleName::IsEmail, "Please enter a valid email address."),
    (RuleName::IsUrl, "Please enter a valid URL."),
    (RuleName::NoSpaces, "Spaces are not allowed."),
    (RuleName::MinLength, "Please enter at least {data0} characters."),
    (RuleName::MaxLength, "Please enter no more than {data0} characters."),
    (RuleName::RangeLength, "Please enter a value between {data0} and {data1} characters long."),
    (RuleName::IsNumber, "Please enter a valid number."),
    (RuleName::Min, "Please enter a value greater than or equal to {data0}."),
    (RuleName::Max, "Please enter a value less than or equal to {data0}."),
    (RuleName::Range, "Please enter a value between {data0} and {data1}."),
    (RuleName::Domains, "Please use an address from an allowed domain."),
    (RuleName::IsDate, "Please enter a valid date ({data0})."),
    (RuleName::DatePrevious, "Please enter a date earlier than today."),
    (RuleName::MinAge, "You must be at least {data0} years old."),
    (RuleName::MaxAge, "You must be at most {data0} years old."),
    (RuleName::Security, "The password must have at least {data0} characters and meet the {data1} security level."),
    (RuleName::EqualTo, "Please enter the same value again."),
    (RuleName::PhoneNumber, "Please enter a valid phone number."),
    (RuleName::PhoneCountry, "Please enter a valid phone number for {data0}."),
    (RuleName::Pattern, "Please match the requested format."),
    (RuleName::Allowed, "Only files of type {data0} are allowed."),
    (RuleName::MinCheck, "Please select at least {data0} options."),
    (RuleName::MaxCheck, "Please select no more than {data0} options."),
];

const ES: &[(RuleName, &str)] = &[
    (RuleName::Required, "Este campo es obligatorio."),
    (RuleName::IsEmail, "Introduce una dirección de correo válida."),
    (RuleName::IsUrl, "Introduce una URL válida."),
    (RuleName::NoSpaces, "No se permiten espacios."),
    (RuleName::MinLength, "Introduce al menos {data0} caracteres."),
    (RuleName::MaxLength, "No introduzcas más de {data0} caracteres."),
    (RuleName::RangeLength, "Introduce un valor de entre {data0} y {data1} caracteres."),
    (RuleName::IsNumber, "Introduce un número válido."),
    (RuleName::Min, "Introduce un valor mayor o igual que {data0}."),
    (RuleName::Max, "Introduce un valor menor o igual que {data0}."),
    (RuleName::Range, "Introduce un valor entre {data0} y {data1}."),
    (RuleName::Domains, "Utiliza una dirección de un dominio permitido."),
    (RuleName::IsDate, "Introduce una fecha válida ({data0})."),
    (RuleName::DatePrevious, "Introduce una fecha anterior a hoy."),
    (RuleName::MinAge, "Debes tener al menos {data0} años."),
    (RuleName::MaxAge, "Debes tener como máximo {data0} años."),
    (RuleName::Security, "La contraseña debe tener al menos {data0} caracteres y cumplir el nivel de seguridad {data1}."),
    (RuleName::EqualTo, "Introduce el mismo valor otra vez."),
    (RuleName::PhoneNumber, "Introduce un número de teléfono válido."),
    (RuleName::PhoneCountry, "Introduce un número de teléfono válido para {data0}."),
    (RuleName::Pattern, "El valor no tiene el formato solicitado."),
    (RuleName::Allowed, "Solo se permiten archivos de tipo {data0}."),
    (RuleName::MinCheck, "Selecciona al menos {data0} opciones."),
    (RuleName::MaxCheck, "Selecciona como máximo {data0} opciones."),
];

const FR: &[(RuleName, &str)] = &[
    (RuleName::Required, "Ce champ est obligatoire."),
    (RuleName::IsEmail, "Veuillez saisir une adresse e-mail valide."),
    (RuleName::IsUrl, "Veuillez saisir une URL valide."),
    (RuleName::NoSpaces, "Les espaces ne sont pas autorisés."),
    (RuleName::MinLength, "Veuillez saisir au moins {data0} caractères."),
    (RuleName::MaxLength, "Veuillez saisir au plus {data0} caractères."),
    (RuleName::RangeLength, "Veuillez saisir entre {data0} et {data1} caractères."),
    (RuleName::IsNumber, "Veuillez saisir un nombre valide."),
    (RuleName::Min, "Veuillez saisir une valeur supérieure ou égale à {data0}."),
    (RuleName::Max, "Veuillez saisir une valeur inférieure ou égale à {data0}."),
    (RuleName::Range, "Veuillez saisir une valeur entre {data0} et {data1}."),
    (RuleName::Domains, "Veuillez utiliser une adresse d'un domaine autorisé."),
    (RuleName::IsDate, "Veuillez saisir une date valide ({data0})."),
    (RuleName::DatePrevious, "Veuillez saisir une date antérieure à aujourd'hui."),
    (RuleName::MinAge, "Vous devez avoir au moins {data0} ans."),
    (RuleName::MaxAge, "Vous devez avoir au plus {data0} ans."),
    (RuleName::Security, "Le mot de passe doit contenir au moins {data0} caractères et respecter le niveau de sécurité {data1}."),
    (RuleName::EqualTo, "Veuillez saisir à nouveau la même valeur."),
    (RuleName::PhoneNumber, "Veuillez saisir un numéro de téléphone valide."),
    (RuleName::PhoneCountry, "Veuillez saisir un numéro de téléphone valide pour {data0}."),
    (RuleName::Pattern, "Veuillez respecter le format demandé."),
    (RuleName::Allowed, "Seuls les fichiers de type {data0} sont autorisés."),
    (RuleName::MinCheck, "Veuillez sélectionner au moins {data0} options."),
    (RuleName::MaxCheck, "Veuillez sélectionner au plus {data0} options."),
];

const PT: &[(RuleName, &str)] = &[
    (RuleName::Required, "Este campo é obrigatório."),
    (RuleName::IsEmail, "Introduza um endereço de email válido."),
    (RuleName::IsUrl, "Introduza um URL válido."),
    (RuleName::NoSpaces, "Não são permitidos espaços."),
    (RuleName::MinLength, "Introduza pelo menos {data0} caracteres."),
    (RuleName::MaxLength, "Introduza no máximo {data0} caracteres."),
    (RuleName::RangeLength, "Introduza um valor entre {data0} e {data1} caracteres."),
    (RuleName::IsNumber, "Introduza um número válido."),
    (RuleName::Min, "Introduza um valor maior ou igual a {data0}."),
    (RuleName::Max, "Introduza um valor menor ou igual a {data0}."),
    (RuleName::Range, "Introduza um valor entre {data0} e {data1}."),
    (RuleName::Domains, "Utilize um endereço de um domínio permitido."),
    (RuleName::IsDate, "Introduza uma data válida ({data0})."),
    (RuleName::DatePrevious, "Introduza uma data anterior a hoje."),
    (RuleName::MinAge, "Deve ter pelo menos {data0} anos."),
    (RuleName::MaxAge, "Deve ter no máximo {data0} anos."),
    (RuleName::Security, "A palavra-passe deve ter pelo menos {data0} caracteres e cumprir o nível de segurança {data1}."),
    (RuleName::EqualTo, "Introduza o mesmo valor novamente."),
    (RuleName::PhoneNumber, "Introduza um número de telefone válido."),
    (RuleName::PhoneCountry, "Introduza um número de telefone válido para {data0}."),
    (RuleName::Pattern, "O valor não tem o formato pedido."),
    (RuleName::Allowed, "Só são permitidos ficheiros do tipo {data0}."),
    (RuleName::MinCheck, "Selecione pelo menos {data0} opções."),
    (RuleName::MaxCheck, "Selecione no máximo {data0} opções."),
];

fn table(entries: &[(RuleName, &str)]) -> HashMap<RuleName, String> {
    entries
        .iter()
        .map(|(rule, template)| (*rule, template.to_string()))
        .collect()
}

/// Locale-keyed template tables.
///
/// [`LocaleCatalog::builtin`] ships `en`, `es`, `fr` and `pt`. Tables can be
/// added or extended with [`LocaleCatalog::insert_locale`]. Lookups try the
/// exact locale code first, then its language subtag (`es-MX` → `es`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCatalog {
    tables: HashMap<String, HashMap<RuleName, String>>,
}

impl LocaleCatalog {
    /// A catalog with no tables at all.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.insert_locale("en", table(EN));
        catalog.insert_locale("es", table(ES));
        catalog.insert_locale("fr", table(FR));
        catalog.insert_locale("pt", table(PT));
        catalog
    }

    /// Merge templates into a locale, replacing existing entries per rule.
    pub fn insert_locale(
        &mut self,
        locale: impl Into<String>,
        templates: impl IntoIterator<Item = (RuleName, String)>,
    ) {
        let locale = normalize_locale(&locale.into());
        self.tables.entry(locale).or_default().extend(templates);
    }

    pub fn with_locale(
        mut self,
        locale: impl Into<String>,
        templates: impl IntoIterator<Item = (RuleName, String)>,
    ) -> Self {
        self.insert_locale(locale, templates);
        self
    }

    /// Known locale codes, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    pub fn table(&self, locale: &str) -> Option<&HashMap<RuleName, String>> {
        self.tables.get(&normalize_locale(locale))
    }
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MessageCatalog for LocaleCatalog {
    fn template(&self, locale: &str, rule: RuleName) -> Option<&str> {
        let locale = normalize_locale(locale);
        let exact = self.tables.get(&locale).and_then(|table| table.get(&rule));
        let language = || {
            let (language, _) = locale.split_once('-')?;
            self.tables.get(language)?.get(&rule)
        };
        exact.or_else(language).map(String::as_str)
    }
}

fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

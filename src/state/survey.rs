//! Survey response record and the closed set of field names

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Every field of the household survey, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Fecha,
    Encuestador,
    ZonaManzana,
    Lote,
    NombreReferente,
    Direccion,
    Telefono,
    AnosResidencia,
    CantidadIntegrantes,
    ListadoIntegrantes,
    TipoVivienda,
    Tenencia,
    AguaPotable,
    EnergiaElectrica,
    Cloacas,
    RecoleccionResiduos,
    Gas,
    Internet,
    ConoceUnionVecinal,
    ParticipaReuniones,
    Participacion,
    ColaboracionSum,
    FormaColaboracion,
    ProblemasBarrio,
    ObraUrgente,
    UsosSum,
    NecesidadConstruccionSum,
    ComentariosAdicionales,
    NombreDniVecino,
    FirmaVecino,
    FirmaEncuestador,
}

impl FieldName {
    /// All fields in the order they appear on the form
    pub const ALL: [FieldName; 31] = [
        Self::Fecha,
        Self::Encuestador,
        Self::ZonaManzana,
        Self::Lote,
        Self::NombreReferente,
        Self::Direccion,
        Self::Telefono,
        Self::AnosResidencia,
        Self::CantidadIntegrantes,
        Self::ListadoIntegrantes,
        Self::TipoVivienda,
        Self::Tenencia,
        Self::AguaPotable,
        Self::EnergiaElectrica,
        Self::Cloacas,
        Self::RecoleccionResiduos,
        Self::Gas,
        Self::Internet,
        Self::ConoceUnionVecinal,
        Self::ParticipaReuniones,
        Self::Participacion,
        Self::ColaboracionSum,
        Self::FormaColaboracion,
        Self::ProblemasBarrio,
        Self::ObraUrgente,
        Self::UsosSum,
        Self::NecesidadConstruccionSum,
        Self::ComentariosAdicionales,
        Self::NombreDniVecino,
        Self::FirmaVecino,
        Self::FirmaEncuestador,
    ];

    /// Wire name, identical to the JSON key of the serialized response
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fecha => "fecha",
            Self::Encuestador => "encuestador",
            Self::ZonaManzana => "zona_manzana",
            Self::Lote => "lote",
            Self::NombreReferente => "nombre_referente",
            Self::Direccion => "direccion",
            Self::Telefono => "telefono",
            Self::AnosResidencia => "anos_residencia",
            Self::CantidadIntegrantes => "cantidad_integrantes",
            Self::ListadoIntegrantes => "listado_integrantes",
            Self::TipoVivienda => "tipo_vivienda",
            Self::Tenencia => "tenencia",
            Self::AguaPotable => "agua_potable",
            Self::EnergiaElectrica => "energia_electrica",
            Self::Cloacas => "cloacas",
            Self::RecoleccionResiduos => "recoleccion_residuos",
            Self::Gas => "gas",
            Self::Internet => "internet",
            Self::ConoceUnionVecinal => "conoce_union_vecinal",
            Self::ParticipaReuniones => "participa_reuniones",
            Self::Participacion => "participacion",
            Self::ColaboracionSum => "colaboracion_sum",
            Self::FormaColaboracion => "forma_colaboracion",
            Self::ProblemasBarrio => "problemas_barrio",
            Self::ObraUrgente => "obra_urgente",
            Self::UsosSum => "usos_sum",
            Self::NecesidadConstruccionSum => "necesidad_construccion_sum",
            Self::ComentariosAdicionales => "comentarios_adicionales",
            Self::NombreDniVecino => "nombre_dni_vecino",
            Self::FirmaVecino => "firma_vecino",
            Self::FirmaEncuestador => "firma_encuestador",
        }
    }

    /// Whether the field holds an ordered list of selections
    #[cfg(test)]
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::Participacion | Self::ProblemasBarrio | Self::UsosSum
        )
    }

    /// Position of the field in [`FieldName::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|f| f == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to error message. A missing key means no error is shown.
pub type ErrorMap = BTreeMap<FieldName, String>;

/// Borrowed view of one field's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// True for the empty string or the empty list
    #[cfg(test)]
    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

/// One completed household survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    // 1. Encuesta domiciliaria
    pub fecha: String,
    pub encuestador: String,
    pub zona_manzana: String,
    pub lote: String,

    // A. Identificación del hogar
    pub nombre_referente: String,
    pub direccion: String,
    pub telefono: String,
    pub anos_residencia: String,
    pub cantidad_integrantes: String,

    // B. Composición familiar
    pub listado_integrantes: String,

    // C. Condiciones de vivienda y servicios
    pub tipo_vivienda: String,
    pub tenencia: String,
    pub agua_potable: String,
    pub energia_electrica: String,
    pub cloacas: String,
    pub recoleccion_residuos: String,
    pub gas: String,
    pub internet: String,

    // D. Participación comunitaria
    pub conoce_union_vecinal: String,
    pub participa_reuniones: String,
    pub participacion: Vec<String>,
    pub colaboracion_sum: String,
    pub forma_colaboracion: String,

    // E. Necesidades y prioridades del barrio
    pub problemas_barrio: Vec<String>,
    pub obra_urgente: String,

    // F. Opinión sobre el SUM
    pub usos_sum: Vec<String>,
    pub necesidad_construccion_sum: String,
    pub comentarios_adicionales: String,

    // G. Consentimiento informado
    pub nombre_dni_vecino: String,
    pub firma_vecino: String,
    pub firma_encuestador: String,
}

impl SurveyResponse {
    /// Blank response dated today
    pub fn new() -> Self {
        Self::dated(today())
    }

    /// Blank response with an explicit `YYYY-MM-DD` date
    pub fn dated(fecha: impl Into<String>) -> Self {
        Self {
            fecha: fecha.into(),
            encuestador: String::new(),
            zona_manzana: String::new(),
            lote: String::new(),
            nombre_referente: String::new(),
            direccion: String::new(),
            telefono: String::new(),
            anos_residencia: String::new(),
            cantidad_integrantes: String::new(),
            listado_integrantes: String::new(),
            tipo_vivienda: String::new(),
            tenencia: String::new(),
            agua_potable: String::new(),
            energia_electrica: String::new(),
            cloacas: String::new(),
            recoleccion_residuos: String::new(),
            gas: String::new(),
            internet: String::new(),
            conoce_union_vecinal: String::new(),
            participa_reuniones: String::new(),
            participacion: Vec::new(),
            colaboracion_sum: String::new(),
            forma_colaboracion: String::new(),
            problemas_barrio: Vec::new(),
            obra_urgente: String::new(),
            usos_sum: Vec::new(),
            necesidad_construccion_sum: String::new(),
            comentarios_adicionales: String::new(),
            nombre_dni_vecino: String::new(),
            firma_vecino: String::new(),
            firma_encuestador: String::new(),
        }
    }

    /// Current value of any field
    pub fn value(&self, name: FieldName) -> FieldValue<'_> {
        match self.list(name) {
            Some(items) => FieldValue::List(items),
            None => FieldValue::Text(self.text(name).unwrap_or_default()),
        }
    }

    /// Scalar value, `None` for list fields
    pub fn text(&self, name: FieldName) -> Option<&str> {
        let value = match name {
            FieldName::Fecha => &self.fecha,
            FieldName::Encuestador => &self.encuestador,
            FieldName::ZonaManzana => &self.zona_manzana,
            FieldName::Lote => &self.lote,
            FieldName::NombreReferente => &self.nombre_referente,
            FieldName::Direccion => &self.direccion,
            FieldName::Telefono => &self.telefono,
            FieldName::AnosResidencia => &self.anos_residencia,
            FieldName::CantidadIntegrantes => &self.cantidad_integrantes,
            FieldName::ListadoIntegrantes => &self.listado_integrantes,
            FieldName::TipoVivienda => &self.tipo_vivienda,
            FieldName::Tenencia => &self.tenencia,
            FieldName::AguaPotable => &self.agua_potable,
            FieldName::EnergiaElectrica => &self.energia_electrica,
            FieldName::Cloacas => &self.cloacas,
            FieldName::RecoleccionResiduos => &self.recoleccion_residuos,
            FieldName::Gas => &self.gas,
            FieldName::Internet => &self.internet,
            FieldName::ConoceUnionVecinal => &self.conoce_union_vecinal,
            FieldName::ParticipaReuniones => &self.participa_reuniones,
            FieldName::ColaboracionSum => &self.colaboracion_sum,
            FieldName::FormaColaboracion => &self.forma_colaboracion,
            FieldName::ObraUrgente => &self.obra_urgente,
            FieldName::NecesidadConstruccionSum => &self.necesidad_construccion_sum,
            FieldName::ComentariosAdicionales => &self.comentarios_adicionales,
            FieldName::NombreDniVecino => &self.nombre_dni_vecino,
            FieldName::FirmaVecino => &self.firma_vecino,
            FieldName::FirmaEncuestador => &self.firma_encuestador,
            FieldName::Participacion | FieldName::ProblemasBarrio | FieldName::UsosSum => {
                return None
            }
        };
        Some(value.as_str())
    }

    /// Mutable scalar slot, `None` for list fields
    pub fn text_mut(&mut self, name: FieldName) -> Option<&mut String> {
        let value = match name {
            FieldName::Fecha => &mut self.fecha,
            FieldName::Encuestador => &mut self.encuestador,
            FieldName::ZonaManzana => &mut self.zona_manzana,
            FieldName::Lote => &mut self.lote,
            FieldName::NombreReferente => &mut self.nombre_referente,
            FieldName::Direccion => &mut self.direccion,
            FieldName::Telefono => &mut self.telefono,
            FieldName::AnosResidencia => &mut self.anos_residencia,
            FieldName::CantidadIntegrantes => &mut self.cantidad_integrantes,
            FieldName::ListadoIntegrantes => &mut self.listado_integrantes,
            FieldName::TipoVivienda => &mut self.tipo_vivienda,
            FieldName::Tenencia => &mut self.tenencia,
            FieldName::AguaPotable => &mut self.agua_potable,
            FieldName::EnergiaElectrica => &mut self.energia_electrica,
            FieldName::Cloacas => &mut self.cloacas,
            FieldName::RecoleccionResiduos => &mut self.recoleccion_residuos,
            FieldName::Gas => &mut self.gas,
            FieldName::Internet => &mut self.internet,
            FieldName::ConoceUnionVecinal => &mut self.conoce_union_vecinal,
            FieldName::ParticipaReuniones => &mut self.participa_reuniones,
            FieldName::ColaboracionSum => &mut self.colaboracion_sum,
            FieldName::FormaColaboracion => &mut self.forma_colaboracion,
            FieldName::ObraUrgente => &mut self.obra_urgente,
            FieldName::NecesidadConstruccionSum => &mut self.necesidad_construccion_sum,
            FieldName::ComentariosAdicionales => &mut self.comentarios_adicionales,
            FieldName::NombreDniVecino => &mut self.nombre_dni_vecino,
            FieldName::FirmaVecino => &mut self.firma_vecino,
            FieldName::FirmaEncuestador => &mut self.firma_encuestador,
            FieldName::Participacion | FieldName::ProblemasBarrio | FieldName::UsosSum => {
                return None
            }
        };
        Some(value)
    }

    /// Multi-select value, `None` for scalar fields
    pub fn list(&self, name: FieldName) -> Option<&[String]> {
        match name {
            FieldName::Participacion => Some(&self.participacion),
            FieldName::ProblemasBarrio => Some(&self.problemas_barrio),
            FieldName::UsosSum => Some(&self.usos_sum),
            _ => None,
        }
    }

    /// Mutable multi-select slot, `None` for scalar fields
    pub fn list_mut(&mut self, name: FieldName) -> Option<&mut Vec<String>> {
        match name {
            FieldName::Participacion => Some(&mut self.participacion),
            FieldName::ProblemasBarrio => Some(&mut self.problemas_barrio),
            FieldName::UsosSum => Some(&mut self.usos_sum),
            _ => None,
        }
    }
}

impl Default for SurveyResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Local date formatted as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

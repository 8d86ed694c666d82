//! Required-field validation

use super::survey::{ErrorMap, FieldName, SurveyResponse};

/// Message shown when a required field is left blank, `None` for optional fields
pub fn required_message(field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::Encuestador => Some("El nombre del encuestador es requerido."),
        FieldName::ZonaManzana => Some("La Zona/Manzana es requerida."),
        FieldName::Lote => Some("El número de lote es requerido."),
        FieldName::NombreReferente => Some("El nombre del referente es requerido."),
        FieldName::Direccion => Some("La dirección es requerida."),
        FieldName::AnosResidencia => Some("Los años de residencia son requeridos."),
        FieldName::CantidadIntegrantes => Some("La cantidad de integrantes es requerida."),
        FieldName::ListadoIntegrantes => Some("El listado de integrantes es requerido."),
        FieldName::NombreDniVecino => Some("El nombre y DNI del vecino son requeridos."),
        FieldName::FirmaVecino => Some("La firma del vecino es requerida."),
        FieldName::FirmaEncuestador => Some("La firma del encuestador es requerida."),
        FieldName::Fecha
        | FieldName::Telefono
        | FieldName::TipoVivienda
        | FieldName::Tenencia
        | FieldName::AguaPotable
        | FieldName::EnergiaElectrica
        | FieldName::Cloacas
        | FieldName::RecoleccionResiduos
        | FieldName::Gas
        | FieldName::Internet
        | FieldName::ConoceUnionVecinal
        | FieldName::ParticipaReuniones
        | FieldName::Participacion
        | FieldName::ColaboracionSum
        | FieldName::FormaColaboracion
        | FieldName::ProblemasBarrio
        | FieldName::ObraUrgente
        | FieldName::UsosSum
        | FieldName::NecesidadConstruccionSum
        | FieldName::ComentariosAdicionales => None,
    }
}

/// Whether the field must be filled in before submitting
pub fn is_required(field: FieldName) -> bool {
    required_message(field).is_some()
}

/// Validate a response. An empty map means the response can be submitted.
pub fn validate(response: &SurveyResponse) -> ErrorMap {
    FieldName::ALL
        .iter()
        .filter_map(|&field| {
            let message = required_message(field)?;
            let blank = response
                .text(field)
                .map(|value| value.trim().is_empty())
                .unwrap_or(false);
            blank.then(|| (field, message.to_string()))
        })
        .collect()
}

/// Response with every required field filled and nothing else touched
#[cfg(test)]
pub(crate) fn complete_response() -> SurveyResponse {
    let mut response = SurveyResponse::dated("2026-10-17");
    for field in FieldName::ALL {
        if is_required(field) {
            if let Some(slot) = response.text_mut(field) {
                *slot = format!("valor {}", field.as_str());
            }
        }
    }
    response
}

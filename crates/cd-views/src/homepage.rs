//! Landing page

use egui::{RichText, ScrollArea, Ui};

/// Draw the home page
pub fn show(ui: &mut Ui) {
    ScrollArea::vertical().id_source("homepage_scroll").show(ui, |ui| {
        ui.heading(RichText::new("Chamados ao 1746").size(28.0));
        ui.add_space(8.0);
        
        ui.label(
            "O 1746 é a central de atendimento da Prefeitura do Rio de Janeiro. \
             Cada solicitação de um cidadão, seja uma lâmpada apagada, um buraco na rua \
             ou uma reclamação de barulho, gera um chamado com data de abertura, tipo, \
             subtipo e o bairro onde ocorreu.",
        );
        ui.add_space(12.0);
        
        ui.label(RichText::new("Dashboards").strong().size(18.0));
        ui.add_space(4.0);
        ui.label(
            "🗓️ Chamados em um dia: quantos chamados foram abertos em uma data, \
             quais os tipos mais frequentes e em quais bairros e subprefeituras.",
        );
        ui.label(
            "🔊 Chamados por subtipo: a evolução diária de um subtipo de chamado nos \
             anos de 2022 e 2023 e como ela se compara aos grandes eventos da cidade \
             (Reveillon, Carnaval, Rock in Rio) e à ocupação da rede hoteleira.",
        );
        ui.add_space(12.0);
        
        ui.label(
            RichText::new("Use os botões da barra lateral para navegar entre as páginas.")
                .italics(),
        );
    });
}
